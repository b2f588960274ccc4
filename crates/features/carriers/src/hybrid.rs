use crate::carrier::Carrier;
use phub_domain::method::Method;
use phub_domain::record::DynamicCarrierRecord;
use serde::Serialize;

/// A single-destination view of a carrier, optionally narrowed to one dynamic carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridCarrier {
    pub carrier_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_carrier_id: Option<i64>,
    pub method: Method,
    pub country: String,
    /// Record name for dynamic carriers, the config title otherwise.
    pub carrier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
}

impl HybridCarrier {
    pub fn from_carrier(carrier: &Carrier, method: Method, country: impl Into<String>) -> Self {
        Self {
            carrier_code: carrier.code().to_owned(),
            dynamic_carrier_id: None,
            method,
            country: country.into(),
            carrier_name: carrier.config().title().to_owned(),
            max_weight: carrier.max_weight(),
        }
    }

    pub fn from_dynamic(
        carrier: &Carrier,
        record: &DynamicCarrierRecord,
        method: Method,
        country: impl Into<String>,
    ) -> Self {
        Self {
            dynamic_carrier_id: Some(record.id),
            carrier_name: record.carrier_name.clone(),
            ..Self::from_carrier(carrier, method, country)
        }
    }

    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic_carrier_id.is_some()
    }
}
