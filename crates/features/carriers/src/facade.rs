//! Cross-carrier orchestration.

use crate::brain::{Brain, DynamicBrain, StaticBrain};
use crate::carrier::Carrier;
use crate::directory::{DirectoryError, DynamicCarrierDirectory, DynamicCarrierStore};
use crate::error::CarrierError;
use crate::hybrid::HybridCarrier;
use crate::pricing::PricingService;
use phub_domain::config::FamilyConfig;
use phub_domain::method::{Method, MethodSet};
use phub_domain::rate::{RateOutcome, RateRequest};
use phub_domain::record::DynamicCarrierRecord;
use phub_kernel::settings::{Scope, ScopedSettings};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{info, instrument};

/// Every registered carrier, addressable by code.
///
/// Built once at bootstrap; cloning is cheap.
#[derive(Debug, Clone)]
pub struct CarrierFacade {
    carriers: Arc<BTreeMap<String, Carrier>>,
    implemented_branch_ids: Arc<BTreeSet<i64>>,
}

/// Registers carrier families and wires the exclusivity set into the dynamic directory.
#[derive(Debug)]
pub struct CarrierFacadeBuilder {
    pricing: Arc<dyn PricingService>,
    scope: Scope,
    static_brains: Vec<Arc<dyn Brain>>,
    dynamic: Option<(String, Arc<dyn DynamicCarrierStore>)>,
}

impl CarrierFacadeBuilder {
    /// Scope the carrier configs are read from.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Registers a statically implemented family described by data.
    #[must_use]
    pub fn static_family(mut self, family: &FamilyConfig) -> Self {
        let brain = StaticBrain::from_config(family, Arc::clone(&self.pricing));
        self.static_brains.push(Arc::new(brain));
        self
    }

    /// Registers a hand-written static family brain.
    #[must_use]
    pub fn brain(mut self, brain: Arc<dyn Brain>) -> Self {
        self.static_brains.push(brain);
        self
    }

    /// Registers the generic dynamic family over `store`.
    #[must_use]
    pub fn dynamic_family(
        mut self,
        name: impl Into<String>,
        store: Arc<dyn DynamicCarrierStore>,
    ) -> Self {
        self.dynamic = Some((name.into(), store));
        self
    }

    /// Builds every carrier's config from `settings` and assembles the facade.
    ///
    /// # Errors
    /// [`CarrierError::DuplicateCarrier`] when two families derive the same carrier code.
    pub fn build(self, settings: &dyn ScopedSettings) -> Result<CarrierFacade, CarrierError> {
        let implemented_branch_ids: BTreeSet<i64> =
            self.static_brains.iter().flat_map(|brain| brain.implemented_branch_ids()).collect();

        let mut brains = self.static_brains;
        if let Some((name, store)) = self.dynamic {
            let directory = DynamicCarrierDirectory::new(store, implemented_branch_ids.clone());
            brains.push(Arc::new(DynamicBrain::new(name, directory, Arc::clone(&self.pricing))));
        }

        let mut carriers = BTreeMap::new();
        for brain in brains {
            let carrier = Carrier::new(brain, settings, &self.scope);
            let code = carrier.code().to_owned();
            if carriers.insert(code.clone(), carrier).is_some() {
                return Err(CarrierError::DuplicateCarrier {
                    message: format!("carrier code '{code}' registered twice").into(),
                    context: None,
                });
            }
        }

        info!(
            carriers = carriers.len(),
            implemented_branch_ids = implemented_branch_ids.len(),
            scope = %self.scope,
            "Carrier facade initialized"
        );

        Ok(CarrierFacade {
            carriers: Arc::new(carriers),
            implemented_branch_ids: Arc::new(implemented_branch_ids),
        })
    }
}

impl CarrierFacade {
    #[must_use = "The builder must be configured before it can be used to build the facade."]
    pub fn builder(pricing: Arc<dyn PricingService>) -> CarrierFacadeBuilder {
        CarrierFacadeBuilder {
            pricing,
            scope: Scope::Default,
            static_brains: Vec::new(),
            dynamic: None,
        }
    }

    /// # Errors
    /// [`CarrierError::UnknownCarrier`] when nothing is registered under `code`.
    pub fn carrier(&self, code: &str) -> Result<&Carrier, CarrierError> {
        self.carriers.get(code).ok_or_else(|| CarrierError::unknown_carrier(code))
    }

    /// Registered carriers in code order.
    pub fn carriers(&self) -> impl Iterator<Item = &Carrier> {
        self.carriers.values()
    }

    /// Outcome of every registered carrier for `request`, keyed by carrier code.
    ///
    /// # Errors
    /// The first carrier failure; abstentions are outcomes, not failures.
    #[instrument(skip_all, fields(country = %request.dest_country_id))]
    pub fn collect_rates(
        &self,
        request: &RateRequest,
    ) -> Result<BTreeMap<String, RateOutcome>, CarrierError> {
        let mut outcomes = BTreeMap::new();
        for (code, carrier) in self.carriers.as_ref() {
            outcomes.insert(code.clone(), carrier.collect_rates(request)?);
        }
        Ok(outcomes)
    }

    /// A view of `code`, narrowed to the dynamic carrier `record_id` when it exists.
    ///
    /// # Errors
    /// Unknown carrier or directory failure.
    pub fn create_hybrid_carrier(
        &self,
        code: &str,
        record_id: Option<i64>,
        method: Method,
        country: &str,
    ) -> Result<HybridCarrier, CarrierError> {
        let carrier = self.carrier(code)?;

        if let Some(id) = record_id
            && let Some(dynamic) = carrier.brain().as_dynamic()
            && let Some(record) = dynamic.dynamic_carrier_by_id(id)?
        {
            return Ok(HybridCarrier::from_dynamic(carrier, &record, method, country));
        }

        Ok(HybridCarrier::from_carrier(carrier, method, country))
    }

    /// `true` iff `id` is numeric with an integral value (`"7"`, `"7.0"`, `"0.7e1"`) naming an
    /// existing record of the dynamic carrier `code`.
    ///
    /// # Errors
    /// Unknown carrier or directory failure.
    pub fn is_dynamic_carrier(&self, code: &str, id: &str) -> Result<bool, CarrierError> {
        let carrier = self.carrier(code)?;

        let Some(id) = parse_record_id(id) else {
            return Ok(false);
        };

        match carrier.brain().as_dynamic() {
            Some(dynamic) => Ok(dynamic.dynamic_carrier_by_id(id)?.is_some()),
            None => Ok(false),
        }
    }

    /// Union of every family's countries over all methods.
    ///
    /// # Errors
    /// Directory failure.
    pub fn all_available_countries(&self) -> Result<BTreeSet<String>, CarrierError> {
        let methods = Method::all();
        let mut countries = BTreeSet::new();
        for carrier in self.carriers.values() {
            countries.extend(carrier.brain().available_countries(&methods)?);
        }
        Ok(countries)
    }

    /// Dynamic carrier ids owned by statically implemented families.
    #[must_use]
    pub fn all_implemented_branch_ids(&self) -> &BTreeSet<i64> {
        &self.implemented_branch_ids
    }

    /// Renames the dynamic carrier `id` served by `code`.
    ///
    /// # Errors
    /// [`CarrierError::NotDynamic`] for static carriers, [`CarrierError::Directory`] with
    /// [`DirectoryError::NotFound`] for unknown ids.
    pub fn rename_dynamic_carrier(
        &self,
        name: &str,
        code: &str,
        id: i64,
    ) -> Result<(), CarrierError> {
        let dynamic = self.dynamic_brain(code)?;

        let record = dynamic.dynamic_carrier_by_id(id)?.ok_or_else(|| DirectoryError::NotFound {
            message: format!("no dynamic carrier with id {id}").into(),
            context: Some(format!("carrier {code}").into()),
        })?;

        dynamic.update_dynamic_carrier_name(name, &record)
    }

    /// # Errors
    /// [`CarrierError::UnknownCarrier`].
    pub fn max_weight(&self, code: &str) -> Result<Option<f64>, CarrierError> {
        Ok(self.carrier(code)?.max_weight())
    }

    /// Dynamic carriers listed for configuration under `code`; `None` for static families.
    ///
    /// # Errors
    /// Unknown carrier or directory failure.
    pub fn configurable_dynamic_carriers(
        &self,
        code: &str,
        country: &str,
        methods: &MethodSet,
    ) -> Result<Option<Vec<DynamicCarrierRecord>>, CarrierError> {
        self.carrier(code)?.brain().find_configurable(country, methods)
    }

    fn dynamic_brain(&self, code: &str) -> Result<&DynamicBrain, CarrierError> {
        self.carrier(code)?.brain().as_dynamic().ok_or_else(|| CarrierError::NotDynamic {
            message: format!("carrier '{code}' does not serve dynamic carriers").into(),
            context: None,
        })
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn parse_record_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        (value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT_ID)
            .then_some(value as i64)
    })
}
