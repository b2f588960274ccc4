//! Carrier configuration snapshots.

use phub_domain::config::CarrierSettings;
use phub_domain::method::{Method, MethodSet};
use phub_domain::record::DynamicCarrierRecord;
use std::ops::Deref;

/// Immutable per-carrier settings, built once when the carrier is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierConfig {
    active: bool,
    /// Empty means "no restriction, defer to the method selector".
    allowed_methods: MethodSet,
    max_weight: Option<f64>,
    title: String,
}

impl CarrierConfig {
    /// An inactive, unrestricted config titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            active: false,
            allowed_methods: MethodSet::new(),
            max_weight: None,
            title: title.into(),
        }
    }

    /// Builds a snapshot from resolved scoped settings; `fallback_title` is used when none is set.
    #[must_use]
    pub fn from_settings(settings: Option<&CarrierSettings>, fallback_title: &str) -> Self {
        let Some(settings) = settings else {
            return Self::new(fallback_title);
        };

        Self {
            active: settings.active.unwrap_or(false),
            allowed_methods: settings.allowed_methods.iter().flatten().copied().collect(),
            max_weight: settings.max_weight,
            title: settings
                .title
                .as_deref()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or(fallback_title)
                .to_owned(),
        }
    }

    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_allowed_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_max_weight(mut self, max_weight: Option<f64>) -> Self {
        self.max_weight = max_weight;
        self
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn allowed_methods(&self) -> &MethodSet {
        &self.allowed_methods
    }

    #[must_use]
    pub const fn max_weight(&self) -> Option<f64> {
        self.max_weight
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Carrier config as seen by one dynamic carrier record.
///
/// Active only while both the family config is active and the record is not deleted;
/// titled by the record and restricted to the record's single method. Everything else
/// is the family config's.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicConfig {
    config: CarrierConfig,
    dynamic_carrier_id: i64,
}

impl DynamicConfig {
    #[must_use]
    pub fn derive(base: &CarrierConfig, record: &DynamicCarrierRecord) -> Self {
        let config = CarrierConfig {
            active: base.active && !record.deleted,
            allowed_methods: MethodSet::from([record.method]),
            max_weight: base.max_weight,
            title: record.carrier_name.clone(),
        };

        Self { config, dynamic_carrier_id: record.id }
    }

    #[must_use]
    pub const fn dynamic_carrier_id(&self) -> i64 {
        self.dynamic_carrier_id
    }
}

impl Deref for DynamicConfig {
    type Target = CarrierConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
