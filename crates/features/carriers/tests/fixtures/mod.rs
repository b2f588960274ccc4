#![allow(dead_code)]

use parking_lot::Mutex;
use phub_carriers::{
    CarrierConfig, CarrierFacade, CarrierQuery, DirectoryError, DynamicCarrierStore, FlatPricing,
    MemoryCarrierStore, MethodLabels, PricingError, PricingService,
};
use phub_domain::config::{CarrierSettings, FamilyConfig, ShippingConfig};
use phub_domain::constants::PACKETA_DYNAMIC;
use phub_domain::method::Method;
use phub_domain::rate::{RateRequest, RateResult};
use phub_domain::record::DynamicCarrierRecord;
use std::sync::Arc;

pub const DYNAMIC_CODE: &str = "packeteryPacketaDynamic";
pub const STATIC_CODE: &str = "packetery";

/// One observed pricing call.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingCall {
    pub carrier_code: String,
    pub carrier_title: String,
    pub methods: MethodLabels,
    pub dynamic_carrier_id: Option<i64>,
}

/// Flat-price pricing that records every call.
#[derive(Debug, Default)]
pub struct RecordingPricing {
    calls: Mutex<Vec<PricingCall>>,
}

impl RecordingPricing {
    pub fn calls(&self) -> Vec<PricingCall> {
        self.calls.lock().clone()
    }

    pub fn dynamic_calls(&self) -> Vec<PricingCall> {
        self.calls().into_iter().filter(|c| c.dynamic_carrier_id.is_some()).collect()
    }
}

impl PricingService for RecordingPricing {
    fn collect_rates(
        &self,
        request: &RateRequest,
        carrier_code: &str,
        config: &CarrierConfig,
        methods: &MethodLabels,
        dynamic_carrier_id: Option<i64>,
    ) -> Result<RateResult, PricingError> {
        self.calls.lock().push(PricingCall {
            carrier_code: carrier_code.to_owned(),
            carrier_title: config.title().to_owned(),
            methods: methods.clone(),
            dynamic_carrier_id,
        });
        FlatPricing::new(1.0).collect_rates(
            request,
            carrier_code,
            config,
            methods,
            dynamic_carrier_id,
        )
    }
}

/// Pricing backend that is always down.
#[derive(Debug)]
pub struct FailingPricing;

impl PricingService for FailingPricing {
    fn collect_rates(
        &self,
        _request: &RateRequest,
        _carrier_code: &str,
        _config: &CarrierConfig,
        _methods: &MethodLabels,
        _dynamic_carrier_id: Option<i64>,
    ) -> Result<RateResult, PricingError> {
        Err(PricingError::Internal { message: "tariff backend unavailable".into(), context: None })
    }
}

/// Store that answers queries in insertion order.
#[derive(Debug)]
pub struct OrderedStore(pub Vec<DynamicCarrierRecord>);

impl DynamicCarrierStore for OrderedStore {
    fn query(&self, query: &CarrierQuery) -> Result<Vec<DynamicCarrierRecord>, DirectoryError> {
        Ok(self.0.iter().filter(|r| query.matches(r)).cloned().collect())
    }

    fn update_name(&self, _query: &CarrierQuery, _name: &str) -> Result<usize, DirectoryError> {
        Err(DirectoryError::Store { message: "read-only store".into(), context: None })
    }
}

pub fn record(id: i64, country: &str, method: Method) -> DynamicCarrierRecord {
    DynamicCarrierRecord::new(id, country, method, format!("Carrier {id}"))
}

/// Both carriers active; the dynamic family restricted to `dynamic_allowed` (empty = unrestricted).
pub fn settings(dynamic_allowed: &[Method]) -> ShippingConfig {
    let mut config = ShippingConfig::default();
    config.carriers.insert(
        STATIC_CODE.to_owned(),
        CarrierSettings {
            active: Some(true),
            title: Some("Packeta".into()),
            max_weight: Some(10.0),
            ..CarrierSettings::default()
        },
    );
    config.carriers.insert(
        DYNAMIC_CODE.to_owned(),
        CarrierSettings {
            active: Some(true),
            title: Some("Packeta carriers".into()),
            allowed_methods: (!dynamic_allowed.is_empty()).then(|| dynamic_allowed.to_vec()),
            max_weight: None,
        },
    );
    config
}

pub fn facade_over(
    store: Arc<dyn DynamicCarrierStore>,
    config: &ShippingConfig,
    pricing: Arc<dyn PricingService>,
) -> CarrierFacade {
    CarrierFacade::builder(pricing)
        .static_family(&FamilyConfig::packetery())
        .dynamic_family(PACKETA_DYNAMIC, store)
        .build(config)
        .expect("facade builds")
}

pub fn facade(
    records: Vec<DynamicCarrierRecord>,
    dynamic_allowed: &[Method],
    pricing: Arc<RecordingPricing>,
) -> CarrierFacade {
    facade_over(
        Arc::new(MemoryCarrierStore::from_records(records)),
        &settings(dynamic_allowed),
        pricing,
    )
}
