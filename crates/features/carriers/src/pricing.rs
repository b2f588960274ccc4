//! Pricing collaborator interface.
//!
//! Turning eligible methods into priced offers is not this crate's business; brains hand the
//! surviving `(method, label)` pairs to a [`PricingService`] and return whatever it produces.

use crate::config::CarrierConfig;
use phub_domain::method::Method;
use phub_domain::rate::{Rate, RateRequest, RateResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Eligible methods with their human labels, in catalog order.
pub type MethodLabels = BTreeMap<Method, String>;

#[phub_derive::phub_error]
pub enum PricingError {
    /// The pricing backend refused the request.
    #[error("Pricing rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal pricing error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Prices eligible methods for one carrier (or one dynamic carrier record).
///
/// Implementations must be safe for concurrent reads.
pub trait PricingService: fmt::Debug + Send + Sync {
    /// # Errors
    /// Any failure is propagated to the caller of the rate collection unchanged.
    fn collect_rates(
        &self,
        request: &RateRequest,
        carrier_code: &str,
        config: &CarrierConfig,
        methods: &MethodLabels,
        dynamic_carrier_id: Option<i64>,
    ) -> Result<RateResult, PricingError>;
}

/// One flat price per eligible method.
///
/// Packages heavier than the carrier's configured maximum get no offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatPricing {
    price: f64,
}

impl FlatPricing {
    #[must_use]
    pub const fn new(price: f64) -> Self {
        Self { price }
    }
}

impl PricingService for FlatPricing {
    fn collect_rates(
        &self,
        request: &RateRequest,
        carrier_code: &str,
        config: &CarrierConfig,
        methods: &MethodLabels,
        dynamic_carrier_id: Option<i64>,
    ) -> Result<RateResult, PricingError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PricingError::Rejected {
                message: format!("invalid flat price {}", self.price).into(),
                context: None,
            });
        }

        if config.max_weight().is_some_and(|max| request.weight > max) {
            return Ok(RateResult::new());
        }

        Ok(methods
            .iter()
            .map(|(&method, label)| Rate {
                carrier_code: carrier_code.to_owned(),
                carrier_title: config.title().to_owned(),
                method,
                method_title: label.clone(),
                dynamic_carrier_id,
                price: self.price,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phub_domain::method::MethodSet;

    fn labels() -> MethodLabels {
        [(Method::PickupPointDelivery, "Pickup".to_owned())].into_iter().collect()
    }

    #[test]
    fn flat_pricing_prices_every_label() {
        let config = CarrierConfig::new("Packeta").with_active(true);
        let rates = FlatPricing::new(99.0)
            .collect_rates(&RateRequest::new("CZ", 1.0), "packetery", &config, &labels(), None)
            .expect("priced");

        assert_eq!(rates.len(), 1);
        let rate = &rates.rates()[0];
        assert_eq!(rate.carrier_title, "Packeta");
        assert_eq!(rate.method_title, "Pickup");
        assert!((rate.price - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_pricing_respects_max_weight() {
        let config = CarrierConfig::new("Packeta")
            .with_max_weight(Some(5.0))
            .with_allowed_methods(MethodSet::new());
        let rates = FlatPricing::new(10.0)
            .collect_rates(&RateRequest::new("CZ", 7.5), "packetery", &config, &labels(), None)
            .expect("priced");
        assert!(rates.is_empty());
    }

    #[test]
    fn negative_price_is_rejected() {
        let config = CarrierConfig::new("Packeta");
        let err = FlatPricing::new(-1.0)
            .collect_rates(&RateRequest::new("CZ", 1.0), "packetery", &config, &labels(), None)
            .expect_err("negative price");
        assert_eq!(err.kind(), "Rejected");
    }
}
