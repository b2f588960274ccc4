use phub_domain::method::{Method, MethodSet};
use phub_domain::rate::{Rate, RateOutcome, RateRequest, RateResult};
use phub_domain::record::DynamicCarrierRecord;
use serde_json::json;

#[test]
fn catalog_order_and_address_predicate() {
    let all: Vec<Method> = Method::all().into_iter().collect();
    assert_eq!(all, Method::ALL.to_vec());
    assert!(!Method::PickupPointDelivery.is_any_address_delivery());
    assert!(Method::AddressDelivery.is_any_address_delivery());
    assert!(Method::DirectAddressDelivery.is_any_address_delivery());
}

#[test]
fn method_names_parse_case_insensitively() {
    assert_eq!("addressDelivery".parse(), Ok(Method::AddressDelivery));
    assert_eq!("PICKUPPOINTDELIVERY".parse(), Ok(Method::PickupPointDelivery));
    let err = "drone".parse::<Method>().expect_err("not a method");
    assert_eq!(err.to_string(), "unknown delivery method 'drone'");
    assert_eq!(Method::DirectAddressDelivery.to_string(), "directAddressDelivery");
}

#[test]
fn method_set_iterates_in_catalog_order() {
    let set: MethodSet =
        [Method::DirectAddressDelivery, Method::PickupPointDelivery].into_iter().collect();
    let order: Vec<_> = set.iter().copied().collect();
    assert_eq!(order, vec![Method::PickupPointDelivery, Method::DirectAddressDelivery]);
}

#[test]
fn record_reads_feed_json() {
    let raw = json!({
        "id": 5,
        "country": "DE",
        "method": "directAddressDelivery",
        "carrierName": "DHL"
    });
    let record: DynamicCarrierRecord = serde_json::from_value(raw).expect("record");
    assert_eq!(record, DynamicCarrierRecord::new(5, "DE", Method::DirectAddressDelivery, "DHL"));
    assert!(record.with_deleted(true).deleted);
}

#[test]
fn rate_result_keys_ignore_order() {
    let rate = |code: &str, id: Option<i64>| Rate {
        carrier_code: code.into(),
        carrier_title: code.into(),
        method: Method::DirectAddressDelivery,
        method_title: "Direct".into(),
        dynamic_carrier_id: id,
        price: 1.0,
    };

    let a: RateResult = [rate("x", Some(5)), rate("y", None)].into_iter().collect();
    let b: RateResult = [rate("y", None), rate("x", Some(5))].into_iter().collect();
    assert_ne!(a, b);
    assert_eq!(a.keys(), b.keys());
    assert_eq!(a.dynamic_carrier_ids().into_iter().collect::<Vec<_>>(), vec![5]);

    let mut merged = RateResult::new();
    merged.append(a);
    merged.append([rate("z", None)].into_iter().collect());
    assert_eq!(merged.len(), 3);
}

#[test]
fn outcome_distinguishes_abstention_from_empty() {
    assert!(RateOutcome::from(None).is_abstained());
    let empty = RateOutcome::from(Some(RateResult::new()));
    assert!(!empty.is_abstained());
    assert!(empty.rates().is_some_and(RateResult::is_empty));

    let request: RateRequest =
        serde_json::from_value(json!({ "destCountryId": "CZ", "weight": 1.5 })).expect("request");
    assert_eq!(request, RateRequest::new("CZ", 1.5));
    assert!(request.with_split_shipment(true).split_shipment);
}
