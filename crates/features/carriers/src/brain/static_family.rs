use crate::brain::{Brain, DestinationTable};
use crate::error::CarrierError;
use crate::method_select::MethodSelect;
use crate::pricing::PricingService;
use phub_domain::config::FamilyConfig;
use phub_domain::method::{Method, MethodSet};
use phub_domain::record::DynamicCarrierRecord;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// A statically implemented carrier family, described entirely by data.
#[derive(Debug, Clone)]
pub struct StaticBrain {
    family: String,
    select: MethodSelect,
    destinations: DestinationTable,
    pickup_point_countries: BTreeSet<String>,
    pricing: Arc<dyn PricingService>,
}

impl StaticBrain {
    /// Labels naming a method outside the catalog are skipped with a warning.
    pub fn from_config(family: &FamilyConfig, pricing: Arc<dyn PricingService>) -> Self {
        let mut select = MethodSelect::new(family.methods.iter().copied());
        for (name, label) in &family.labels {
            match name.parse::<Method>() {
                Ok(method) => select = select.with_label(method, label.as_str()),
                Err(e) => warn!(family = %family.name, "Ignoring method label: {e}"),
            }
        }

        Self {
            family: family.name.clone(),
            select,
            destinations: DestinationTable::from_entries(&family.destinations),
            pickup_point_countries: family.pickup_point_countries.iter().cloned().collect(),
            pricing,
        }
    }
}

impl Brain for StaticBrain {
    fn family(&self) -> &str {
        &self.family
    }

    fn method_select(&self) -> &MethodSelect {
        &self.select
    }

    fn pricing(&self) -> &dyn PricingService {
        self.pricing.as_ref()
    }

    fn resolve_point_id(
        &self,
        method: Method,
        country: &str,
        _record: Option<&DynamicCarrierRecord>,
    ) -> Result<Option<i64>, CarrierError> {
        Ok(self.destinations.point_id(method, country))
    }

    fn available_countries(&self, methods: &MethodSet) -> Result<BTreeSet<String>, CarrierError> {
        let mut countries = BTreeSet::new();
        for &method in methods.intersection(&self.select.methods()) {
            if method == Method::PickupPointDelivery {
                countries.extend(self.pickup_point_countries.iter().cloned());
            }
            countries.extend(self.destinations.countries(method).map(str::to_owned));
        }
        Ok(countries)
    }

    fn implemented_branch_ids(&self) -> BTreeSet<i64> {
        self.destinations.point_ids()
    }
}
