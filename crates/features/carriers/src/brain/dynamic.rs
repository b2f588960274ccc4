use crate::brain::Brain;
use crate::carrier::Carrier;
use crate::config::{CarrierConfig, DynamicConfig};
use crate::directory::DynamicCarrierDirectory;
use crate::error::{CarrierError, CarrierErrorExt};
use crate::method_select::MethodSelect;
use crate::pricing::{MethodLabels, PricingService};
use phub_domain::method::{Method, MethodSet};
use phub_domain::rate::{RateRequest, RateResult};
use phub_domain::record::DynamicCarrierRecord;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// The generic family aggregating every feed-sourced carrier not owned by a static family.
///
/// Its top-level carrier has no method set of its own; methods, titles and point ids
/// exist per record only.
#[derive(Debug, Clone)]
pub struct DynamicBrain {
    family: String,
    select: MethodSelect,
    directory: DynamicCarrierDirectory,
    pricing: Arc<dyn PricingService>,
}

impl DynamicBrain {
    pub fn new(
        family: impl Into<String>,
        directory: DynamicCarrierDirectory,
        pricing: Arc<dyn PricingService>,
    ) -> Self {
        Self { family: family.into(), select: MethodSelect::all(), directory, pricing }
    }

    #[must_use]
    pub const fn directory(&self) -> &DynamicCarrierDirectory {
        &self.directory
    }

    /// # Errors
    /// Propagates directory failures.
    pub fn find_resolvable(&self) -> Result<Vec<DynamicCarrierRecord>, CarrierError> {
        Ok(self.directory.find_resolvable()?)
    }

    /// # Errors
    /// Propagates directory failures.
    pub fn dynamic_carrier_by_id(
        &self,
        id: i64,
    ) -> Result<Option<DynamicCarrierRecord>, CarrierError> {
        Ok(self.directory.find_by_id(id)?)
    }

    /// # Errors
    /// [`CarrierError::Directory`] when the record vanished or the store fails.
    pub fn update_dynamic_carrier_name(
        &self,
        name: &str,
        record: &DynamicCarrierRecord,
    ) -> Result<(), CarrierError> {
        self.directory.rename(record.id, name).context(format!("dynamic carrier {}", record.id))
    }

    /// Whether `record` serves `method` in `country`.
    ///
    /// Strict equality on both country and method; deleted records serve nothing.
    #[must_use]
    pub fn validate_dynamic_carrier(
        &self,
        method: Method,
        country: &str,
        record: &DynamicCarrierRecord,
    ) -> bool {
        !record.deleted && record.country == country && record.method == method
    }

    /// Whether `method` can be collected for `record` in `country`.
    ///
    /// Non-pickup methods need a resolvable point, the country must be indexed for the
    /// method, and the record must validate.
    ///
    /// # Errors
    /// Propagates directory failures.
    pub fn is_available_for_collection(
        &self,
        method: Method,
        country: &str,
        record: &DynamicCarrierRecord,
    ) -> Result<bool, CarrierError> {
        if method != Method::PickupPointDelivery
            && self.resolve_point_id(method, country, Some(record))?.is_none()
        {
            return Ok(false);
        }

        let countries = self.available_countries(&MethodSet::from([method]))?;
        Ok(countries.contains(country) && self.validate_dynamic_carrier(method, country, record))
    }

    /// Family-level allowed methods intersected with the record's single method.
    #[must_use]
    pub fn final_allowed_methods_dynamic(
        &self,
        config: &CarrierConfig,
        dynamic_config: &DynamicConfig,
    ) -> MethodSet {
        self.final_allowed_methods(config)
            .intersection(dynamic_config.allowed_methods())
            .copied()
            .collect()
    }

    /// Collects the offers of one record; `Ok(None)` means the record contributes nothing.
    ///
    /// # Errors
    /// Directory and pricing failures propagate.
    #[instrument(skip_all, fields(carrier = carrier.code(), dynamic_carrier_id = record.id))]
    pub fn collect_rates_dynamic(
        &self,
        carrier: &Carrier,
        request: &RateRequest,
        record: &DynamicCarrierRecord,
    ) -> Result<Option<RateResult>, CarrierError> {
        let config = carrier.config();
        let dynamic_config = DynamicConfig::derive(config, record);

        if !self.is_collection_possible(request, &dynamic_config) {
            debug!("Dynamic carrier inactive or deleted");
            return Ok(None);
        }

        let mut labels = MethodLabels::new();
        for method in self.final_allowed_methods_dynamic(config, &dynamic_config) {
            if !self.is_available_for_collection(method, &request.dest_country_id, record)? {
                debug!(%method, country = %request.dest_country_id, "Method not available");
                continue;
            }
            labels.insert(method, self.select.label(method)?.to_owned());
        }

        if labels.is_empty() {
            return Ok(None);
        }

        let rates = self
            .pricing
            .collect_rates(request, carrier.code(), &dynamic_config, &labels, Some(record.id))
            .context(format!("dynamic carrier {}", record.id))?;

        Ok(Some(rates))
    }
}

impl Brain for DynamicBrain {
    fn family(&self) -> &str {
        &self.family
    }

    fn method_select(&self) -> &MethodSelect {
        &self.select
    }

    fn pricing(&self) -> &dyn PricingService {
        self.pricing.as_ref()
    }

    /// The record's own id when it validates for `method` and `country`.
    fn resolve_point_id(
        &self,
        method: Method,
        country: &str,
        record: Option<&DynamicCarrierRecord>,
    ) -> Result<Option<i64>, CarrierError> {
        let record = record.ok_or_else(|| CarrierError::MissingDynamicContext {
            message: "dynamic point resolution requires a dynamic carrier record".into(),
            context: Some(format!("{method} to {country}").into()),
        })?;

        Ok(self.validate_dynamic_carrier(method, country, record).then_some(record.id))
    }

    fn available_countries(&self, methods: &MethodSet) -> Result<BTreeSet<String>, CarrierError> {
        Ok(self.directory.available_countries(methods)?)
    }

    /// Skips enumeration entirely when collection is impossible for the family config,
    /// then unions the contribution of every resolvable record.
    fn collect_rates(
        &self,
        carrier: &Carrier,
        request: &RateRequest,
    ) -> Result<Option<RateResult>, CarrierError> {
        if !self.is_collection_possible(request, carrier.config()) {
            debug!(carrier = carrier.code(), "Collection not possible, abstaining");
            return Ok(None);
        }

        let mut rates = RateResult::new();
        for record in self.find_resolvable()? {
            if let Some(contribution) = self.collect_rates_dynamic(carrier, request, &record)? {
                rates.append(contribution);
            }
        }

        Ok(Some(rates))
    }

    fn allowed_methods(&self, _config: &CarrierConfig) -> Result<MethodLabels, CarrierError> {
        Ok(MethodLabels::new())
    }

    fn find_configurable(
        &self,
        country: &str,
        methods: &MethodSet,
    ) -> Result<Option<Vec<DynamicCarrierRecord>>, CarrierError> {
        Ok(Some(self.directory.find_configurable(country, methods)?))
    }

    fn is_assignable_to_pricing_rule(&self) -> bool {
        false
    }

    fn as_dynamic(&self) -> Option<&DynamicBrain> {
        Some(self)
    }
}
