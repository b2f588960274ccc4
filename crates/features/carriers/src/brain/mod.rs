//! Brains: per-family behavior delegates.
//!
//! A brain owns eligibility, method filtering, destination resolution and the rate
//! collection flow of exactly one carrier family. Brains are stateless between requests;
//! the per-carrier state is the [`CarrierConfig`] they build once.

mod destinations;
mod dynamic;
mod static_family;

pub use destinations::DestinationTable;
pub use dynamic::DynamicBrain;
pub use static_family::StaticBrain;

use crate::carrier::Carrier;
use crate::config::CarrierConfig;
use crate::error::{CarrierError, CarrierErrorExt};
use crate::method_select::MethodSelect;
use crate::pricing::{MethodLabels, PricingService};
use phub_domain::method::{Method, MethodSet};
use phub_domain::rate::{RateRequest, RateResult};
use phub_domain::record::DynamicCarrierRecord;
use phub_kernel::settings::{Scope, ScopedSettings, carrier_path};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Carrier code of a family: its name with the first character lower-cased.
#[must_use]
pub fn carrier_code_for(family: &str) -> String {
    let mut chars = family.chars();
    chars.next().map_or_else(String::new, |first| first.to_lowercase().chain(chars).collect())
}

/// The common contract of every carrier family.
pub trait Brain: fmt::Debug + Send + Sync {
    /// Family name, e.g. `Packetery`.
    fn family(&self) -> &str;

    fn method_select(&self) -> &MethodSelect;

    fn pricing(&self) -> &dyn PricingService;

    /// Point id serving `method` in `country`, or `None` if unmapped.
    ///
    /// Static families ignore `record`.
    ///
    /// # Errors
    /// Families that resolve points per record fail with
    /// [`CarrierError::MissingDynamicContext`] when `record` is absent.
    fn resolve_point_id(
        &self,
        method: Method,
        country: &str,
        record: Option<&DynamicCarrierRecord>,
    ) -> Result<Option<i64>, CarrierError>;

    /// Countries where any of `methods` can be delivered by this family.
    ///
    /// # Errors
    /// Propagates directory failures.
    fn available_countries(&self, methods: &MethodSet) -> Result<BTreeSet<String>, CarrierError>;

    fn carrier_code(&self) -> String {
        carrier_code_for(self.family())
    }

    /// Builds the family config from the `carriers/<code>` settings of `scope`.
    fn create_config(&self, settings: &dyn ScopedSettings, scope: &Scope) -> CarrierConfig {
        let path = carrier_path(&self.carrier_code());
        CarrierConfig::from_settings(settings.get_value(&path, scope).as_ref(), self.family())
    }

    /// Dynamic carrier ids this family implements itself.
    fn implemented_branch_ids(&self) -> BTreeSet<i64> {
        BTreeSet::new()
    }

    /// `false` for split shipment checkouts and inactive configs.
    fn is_collection_possible(&self, request: &RateRequest, config: &CarrierConfig) -> bool {
        !request.split_shipment && config.is_active()
    }

    /// The config restriction if any, the family capability otherwise.
    fn final_allowed_methods(&self, config: &CarrierConfig) -> MethodSet {
        if config.allowed_methods().is_empty() {
            self.method_select().methods()
        } else {
            config.allowed_methods().clone()
        }
    }

    /// Collects offers for `carrier`; `Ok(None)` means the carrier abstains.
    ///
    /// # Errors
    /// [`CarrierError::UnknownMethod`] when the config allows a method the family cannot
    /// label, or the pricing collaborator's failure.
    fn collect_rates(
        &self,
        carrier: &Carrier,
        request: &RateRequest,
    ) -> Result<Option<RateResult>, CarrierError> {
        let config = carrier.config();
        if !self.is_collection_possible(request, config) {
            debug!(carrier = carrier.code(), "Collection not possible, abstaining");
            return Ok(None);
        }

        let labels = self.method_select().labels_for(self.final_allowed_methods(config))?;
        let rates = self
            .pricing()
            .collect_rates(request, carrier.code(), config, &labels, None)
            .context(format!("carrier {}", carrier.code()))?;

        Ok(Some(rates))
    }

    /// Final allowed methods of `config`, labelled.
    ///
    /// # Errors
    /// [`CarrierError::UnknownMethod`] for a configured method outside the family capability.
    fn allowed_methods(&self, config: &CarrierConfig) -> Result<MethodLabels, CarrierError> {
        self.method_select().labels_for(self.final_allowed_methods(config))
    }

    /// Dynamic carriers listed for configuration; `None` for families without any.
    ///
    /// # Errors
    /// Propagates directory failures.
    fn find_configurable(
        &self,
        _country: &str,
        _methods: &MethodSet,
    ) -> Result<Option<Vec<DynamicCarrierRecord>>, CarrierError> {
        Ok(None)
    }

    fn is_assignable_to_pricing_rule(&self) -> bool {
        true
    }

    fn as_dynamic(&self) -> Option<&DynamicBrain> {
        None
    }
}
