use crate::brain::Brain;
use crate::config::CarrierConfig;
use crate::error::CarrierError;
use crate::pricing::MethodLabels;
use phub_domain::rate::{RateOutcome, RateRequest};
use phub_kernel::settings::{Scope, ScopedSettings};
use std::sync::Arc;
use tracing::instrument;

/// The unit a host addresses by code: one brain plus the config it built.
#[derive(Debug, Clone)]
pub struct Carrier {
    code: String,
    brain: Arc<dyn Brain>,
    config: Arc<CarrierConfig>,
}

impl Carrier {
    /// Binds `brain` and builds its config from `settings` once.
    pub fn new(brain: Arc<dyn Brain>, settings: &dyn ScopedSettings, scope: &Scope) -> Self {
        let config = brain.create_config(settings, scope);
        Self::with_config(brain, config)
    }

    /// Binds `brain` to an already built config.
    pub fn with_config(brain: Arc<dyn Brain>, config: CarrierConfig) -> Self {
        Self { code: brain.carrier_code(), brain, config: Arc::new(config) }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn brain(&self) -> &dyn Brain {
        self.brain.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    #[must_use]
    pub fn max_weight(&self) -> Option<f64> {
        self.config.max_weight()
    }

    /// Offers of this carrier for `request`, or [`RateOutcome::Abstained`].
    ///
    /// # Errors
    /// Contract violations, unknown labels, directory and pricing failures. Abstentions
    /// are never errors.
    #[instrument(skip_all, fields(carrier = %self.code, country = %request.dest_country_id))]
    pub fn collect_rates(&self, request: &RateRequest) -> Result<RateOutcome, CarrierError> {
        Ok(self.brain.collect_rates(self, request)?.into())
    }

    /// Labelled methods this carrier offers; empty for the dynamic family.
    ///
    /// # Errors
    /// [`CarrierError::UnknownMethod`] for a configured method outside the family capability.
    pub fn allowed_methods(&self) -> Result<MethodLabels, CarrierError> {
        self.brain.allowed_methods(&self.config)
    }
}
