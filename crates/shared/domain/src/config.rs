use crate::constants::{
    ADDRESS_DELIVERY_POINTS, PACKETA_DYNAMIC, PACKETERY, PICKUP_POINT_COUNTRIES,
};
use crate::method::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level shipping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingConfigInner {
    /// Statically implemented carrier families, as data.
    pub families: Vec<FamilyConfig>,
    pub dynamic: DynamicFamilyConfig,
    /// Default-scope carrier settings keyed by carrier code.
    pub carriers: BTreeMap<String, CarrierSettings>,
    /// Store-scope overrides keyed by store code.
    pub stores: BTreeMap<String, StoreSettings>,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    #[serde(flatten, default)]
    inner: Arc<ShippingConfigInner>,
}

impl Deref for ShippingConfig {
    type Target = ShippingConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ShippingConfig {
    fn deref_mut(&mut self) -> &mut ShippingConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Per-carrier settings of one scope. Unset fields fall through to the lower scope.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierSettings {
    pub active: Option<bool>,
    pub title: Option<String>,
    /// Explicit method restriction; empty or unset means "whatever the family offers".
    pub allowed_methods: Option<Vec<Method>>,
    /// Maximum package weight in kilograms.
    pub max_weight: Option<f64>,
}

impl CarrierSettings {
    /// Field-wise override: every field set in `upper` wins over `self`.
    #[must_use]
    pub fn overlay(&self, upper: &Self) -> Self {
        Self {
            active: upper.active.or(self.active),
            title: upper.title.clone().or_else(|| self.title.clone()),
            allowed_methods: upper.allowed_methods.clone().or_else(|| self.allowed_methods.clone()),
            max_weight: upper.max_weight.or(self.max_weight),
        }
    }
}

/// Store-scope settings.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub carriers: BTreeMap<String, CarrierSettings>,
}

/// A statically implemented carrier family described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Family name; the carrier code is derived from it.
    pub name: String,
    /// Methods the family can offer in principle.
    pub methods: Vec<Method>,
    /// Countries where pickup point delivery is served.
    #[serde(default)]
    pub pickup_point_countries: Vec<String>,
    /// `(method, country) -> point id` rows.
    #[serde(default)]
    pub destinations: Vec<DestinationEntry>,
    /// Method labels overriding [`Method::default_label`], keyed by method name.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl FamilyConfig {
    /// The built-in Packeta family: pickup points plus Packeta home delivery.
    #[must_use]
    pub fn packetery() -> Self {
        Self {
            name: PACKETERY.to_owned(),
            methods: vec![Method::PickupPointDelivery, Method::AddressDelivery],
            pickup_point_countries: PICKUP_POINT_COUNTRIES.iter().map(|&c| c.to_owned()).collect(),
            destinations: ADDRESS_DELIVERY_POINTS
                .iter()
                .map(|&(country, point_id)| DestinationEntry {
                    method: Method::AddressDelivery,
                    country: country.to_owned(),
                    point_id,
                })
                .collect(),
            labels: BTreeMap::new(),
        }
    }
}

/// One row of a static destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationEntry {
    pub method: Method,
    pub country: String,
    pub point_id: i64,
}

/// The generic family serving feed-sourced carriers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicFamilyConfig {
    pub name: String,
    pub enabled: bool,
}

/// Logging knobs read by binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub path: Option<PathBuf>,
    pub json: bool,
    /// Print event targets on the console.
    pub targets: bool,
}

// --- Default ---

impl Default for ShippingConfigInner {
    fn default() -> Self {
        let active = CarrierSettings { active: Some(true), ..CarrierSettings::default() };
        let carriers = [("packetery", active.clone()), ("packeteryPacketaDynamic", active)]
            .into_iter()
            .map(|(code, settings)| (code.to_owned(), settings))
            .collect();

        Self {
            families: vec![FamilyConfig::packetery()],
            dynamic: DynamicFamilyConfig::default(),
            carriers,
            stores: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DynamicFamilyConfig {
    fn default() -> Self {
        Self { name: PACKETA_DYNAMIC.to_owned(), enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false, targets: false }
    }
}
