//! Rate request, priced offers and collection outcomes.

use crate::method::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The destination and checkout context a quote is requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    /// ISO 3166-1 alpha-2 destination country.
    pub dest_country_id: String,
    /// Package weight in kilograms.
    pub weight: f64,
    /// Multi-destination (split shipment) checkout; no carrier quotes there.
    #[serde(default)]
    pub split_shipment: bool,
}

impl RateRequest {
    pub fn new(dest_country_id: impl Into<String>, weight: f64) -> Self {
        Self { dest_country_id: dest_country_id.into(), weight, split_shipment: false }
    }

    #[must_use]
    pub const fn with_split_shipment(mut self, split: bool) -> Self {
        self.split_shipment = split;
        self
    }
}

/// One priced offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub carrier_code: String,
    pub carrier_title: String,
    pub method: Method,
    pub method_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_carrier_id: Option<i64>,
    pub price: f64,
}

/// Identity of an offer inside a [`RateResult`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RateKey {
    pub carrier_code: String,
    pub method: Method,
    pub dynamic_carrier_id: Option<i64>,
}

impl Rate {
    #[must_use]
    pub fn key(&self) -> RateKey {
        RateKey {
            carrier_code: self.carrier_code.clone(),
            method: self.method,
            dynamic_carrier_id: self.dynamic_carrier_id,
        }
    }
}

/// Ordered collection of offers. Composite results are plain concatenations,
/// so callers must not rely on the order across contributors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateResult {
    rates: Vec<Rate>,
}

impl RateResult {
    #[must_use]
    pub const fn new() -> Self {
        Self { rates: Vec::new() }
    }

    /// Appends every offer of `other`.
    pub fn append(&mut self, other: Self) {
        self.rates.extend(other.rates);
    }

    #[must_use]
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Offer identities; equal key sets mean equal results up to ordering.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<RateKey> {
        self.rates.iter().map(Rate::key).collect()
    }

    #[must_use]
    pub fn dynamic_carrier_ids(&self) -> BTreeSet<i64> {
        self.rates.iter().filter_map(|r| r.dynamic_carrier_id).collect()
    }
}

impl FromIterator<Rate> for RateResult {
    fn from_iter<I: IntoIterator<Item = Rate>>(iter: I) -> Self {
        Self { rates: iter.into_iter().collect() }
    }
}

impl IntoIterator for RateResult {
    type Item = Rate;
    type IntoIter = std::vec::IntoIter<Rate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.into_iter()
    }
}

/// What a carrier answers for one request.
///
/// `Abstained` means "nothing from this carrier" and is distinct from an empty result;
/// hosts treat both as "no shipping option" without surfacing a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "rates")]
pub enum RateOutcome {
    Rates(RateResult),
    Abstained,
}

impl RateOutcome {
    #[must_use]
    pub const fn is_abstained(&self) -> bool {
        matches!(self, Self::Abstained)
    }

    #[must_use]
    pub const fn rates(&self) -> Option<&RateResult> {
        match self {
            Self::Rates(rates) => Some(rates),
            Self::Abstained => None,
        }
    }
}

impl From<Option<RateResult>> for RateOutcome {
    fn from(value: Option<RateResult>) -> Self {
        value.map_or(Self::Abstained, Self::Rates)
    }
}
