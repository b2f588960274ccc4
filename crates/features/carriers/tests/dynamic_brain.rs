mod fixtures;

use fixtures::{
    DYNAMIC_CODE, FailingPricing, RecordingPricing, facade, facade_over, record, settings,
};
use phub_carriers::{
    Brain, CarrierError, CarrierQuery, DirectoryError, DynamicCarrierStore, MemoryCarrierStore,
};
use phub_domain::method::Method;
use phub_domain::rate::{RateKey, RateOutcome, RateRequest};
use phub_domain::record::DynamicCarrierRecord;
use std::sync::Arc;

/// Store whose reads always fail; any enumeration surfaces as an error.
#[derive(Debug)]
struct UnreachableStore;

impl DynamicCarrierStore for UnreachableStore {
    fn query(&self, _query: &CarrierQuery) -> Result<Vec<DynamicCarrierRecord>, DirectoryError> {
        Err(DirectoryError::Store { message: "connection refused".into(), context: None })
    }

    fn update_name(&self, _query: &CarrierQuery, _name: &str) -> Result<usize, DirectoryError> {
        Err(DirectoryError::Store { message: "connection refused".into(), context: None })
    }
}

fn dynamic_rates(outcome: &RateOutcome) -> Vec<RateKey> {
    outcome.rates().map(|r| r.keys().into_iter().collect()).unwrap_or_default()
}

#[test]
fn active_record_in_destination_country_is_offered() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(vec![record(7, "CZ", Method::AddressDelivery)], &[], pricing.clone());

    let outcome = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("CZ", 1.0))
        .expect("collects");

    assert_eq!(
        dynamic_rates(&outcome),
        vec![RateKey {
            carrier_code: DYNAMIC_CODE.to_owned(),
            method: Method::AddressDelivery,
            dynamic_carrier_id: Some(7),
        }]
    );

    let calls = pricing.dynamic_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].carrier_title, "Carrier 7");
    assert_eq!(
        calls[0].methods.get(&Method::AddressDelivery).map(String::as_str),
        Some("Address Delivery")
    );
}

#[test]
fn deleted_record_contributes_nothing() {
    let pricing = Arc::new(RecordingPricing::default());
    let deleted = record(7, "CZ", Method::AddressDelivery).with_deleted(true);
    let facade = facade(vec![deleted], &[], pricing.clone());

    let outcome = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("CZ", 1.0))
        .expect("collects");

    assert_eq!(outcome, RateOutcome::Rates(Default::default()));
    assert!(pricing.dynamic_calls().is_empty());
}

#[test]
fn record_of_another_country_is_excluded() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(vec![record(7, "SK", Method::AddressDelivery)], &[], pricing.clone());
    let carrier = facade.carrier(DYNAMIC_CODE).expect("dynamic carrier");
    let dynamic = carrier.brain().as_dynamic().expect("dynamic brain");

    let sk = record(7, "SK", Method::AddressDelivery);
    assert!(!dynamic.validate_dynamic_carrier(Method::AddressDelivery, "CZ", &sk));
    assert_eq!(
        dynamic.resolve_point_id(Method::AddressDelivery, "CZ", Some(&sk)).expect("resolves"),
        None
    );

    let outcome = carrier.collect_rates(&RateRequest::new("CZ", 1.0)).expect("collects");
    assert!(dynamic_rates(&outcome).is_empty());
    assert!(pricing.dynamic_calls().is_empty());
}

#[test]
fn family_restriction_excludes_other_methods() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(
        vec![
            record(7, "CZ", Method::AddressDelivery),
            record(8, "CZ", Method::PickupPointDelivery),
        ],
        &[Method::PickupPointDelivery],
        pricing.clone(),
    );

    let outcome = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("CZ", 1.0))
        .expect("collects");

    let ids = outcome.rates().map(|r| r.dynamic_carrier_ids()).unwrap_or_default();
    assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![8]);
    assert!(pricing.dynamic_calls().iter().all(|c| c.dynamic_carrier_id != Some(7)));
}

#[test]
fn split_shipment_abstains_without_enumerating() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade_over(Arc::new(UnreachableStore), &settings(&[]), pricing.clone());
    let split = RateRequest::new("CZ", 1.0).with_split_shipment(true);

    let outcomes = facade.collect_rates(&split).expect("no enumeration, no store error");
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.values().all(RateOutcome::is_abstained));
    assert!(pricing.calls().is_empty());

    let err = facade.collect_rates(&RateRequest::new("CZ", 1.0)).expect_err("store is down");
    assert!(matches!(err, CarrierError::Directory { .. }));
}

#[test]
fn pickup_point_records_need_no_point_resolution() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(vec![record(9, "SK", Method::PickupPointDelivery)], &[], pricing);

    let outcome = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("SK", 1.0))
        .expect("collects");
    assert_eq!(outcome.rates().map(|r| r.dynamic_carrier_ids().len()), Some(1));
}

#[test]
fn point_resolution_is_record_scoped() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(vec![], &[], pricing);
    let brain = facade.carrier(DYNAMIC_CODE).expect("dynamic carrier").brain();

    let err = brain
        .resolve_point_id(Method::DirectAddressDelivery, "DE", None)
        .expect_err("no record given");
    assert!(matches!(err, CarrierError::MissingDynamicContext { .. }));

    let dhl = record(5, "DE", Method::DirectAddressDelivery);
    assert_eq!(
        brain.resolve_point_id(Method::DirectAddressDelivery, "DE", Some(&dhl)).ok(),
        Some(Some(5))
    );
    assert_eq!(
        brain.resolve_point_id(Method::PickupPointDelivery, "DE", Some(&dhl)).ok(),
        Some(None)
    );
}

#[test]
fn dynamic_family_has_no_family_level_methods() {
    let pricing = Arc::new(RecordingPricing::default());
    let facade = facade(vec![record(7, "CZ", Method::AddressDelivery)], &[], pricing);
    let carrier = facade.carrier(DYNAMIC_CODE).expect("dynamic carrier");

    assert!(carrier.allowed_methods().expect("labels").is_empty());
    assert!(!carrier.brain().is_assignable_to_pricing_rule());
    assert_eq!(carrier.config().title(), "Packeta carriers");
}

#[test]
fn inactive_family_abstains() {
    let pricing = Arc::new(RecordingPricing::default());
    let mut config = settings(&[]);
    config.carriers.remove(DYNAMIC_CODE);
    let store = MemoryCarrierStore::from_records([record(7, "CZ", Method::AddressDelivery)]);
    let facade = facade_over(Arc::new(store), &config, pricing.clone());

    let outcome = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("CZ", 1.0))
        .expect("collects");
    assert!(outcome.is_abstained());
    assert!(pricing.calls().is_empty());
}

#[test]
fn pricing_failures_propagate() {
    let store = MemoryCarrierStore::from_records([record(7, "CZ", Method::AddressDelivery)]);
    let facade = facade_over(Arc::new(store), &settings(&[]), Arc::new(FailingPricing));

    let err = facade
        .carrier(DYNAMIC_CODE)
        .expect("dynamic carrier")
        .collect_rates(&RateRequest::new("CZ", 1.0))
        .expect_err("pricing is down");
    assert_eq!(err.kind(), "Pricing");
    assert!(err.to_string().contains("dynamic carrier 7"));
}
