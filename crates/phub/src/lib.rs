//! Facade crate for `ParcelHub` features and shared modules.
//! Re-exports domain/kernel primitives and composes the carriers slice from configuration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use phub::carriers::{FlatPricing, MemoryCarrierStore};
//! use phub::domain::config::ShippingConfig;
//! use phub::kernel::settings::Scope;
//!
//! let facade = phub::init(
//!     &ShippingConfig::default(),
//!     Scope::Default,
//!     Arc::new(MemoryCarrierStore::new()),
//!     Arc::new(FlatPricing::new(3.0)),
//! )
//! .unwrap();
//! assert!(facade.carrier("packetery").is_ok());
//! ```

pub use phub_carriers as carriers;
pub use phub_domain as domain;
pub use phub_kernel as kernel;

use phub_carriers::{CarrierError, CarrierFacade, DynamicCarrierStore, PricingService};
use phub_domain::config::ShippingConfig;
use phub_kernel::settings::Scope;
use std::sync::Arc;

/// Registers every configured carrier family and builds the facade.
///
/// Static families come from `config.families`; the dynamic family is registered over
/// `store` unless disabled.
///
/// # Errors
/// [`CarrierError::DuplicateCarrier`] when two families derive the same carrier code.
pub fn init(
    config: &ShippingConfig,
    scope: Scope,
    store: Arc<dyn DynamicCarrierStore>,
    pricing: Arc<dyn PricingService>,
) -> Result<CarrierFacade, CarrierError> {
    let mut builder = CarrierFacade::builder(pricing).scope(scope);

    for family in &config.families {
        builder = builder.static_family(family);
    }

    if config.dynamic.enabled {
        builder = builder.dynamic_family(config.dynamic.name.as_str(), store);
    } else {
        tracing::info!(family = %config.dynamic.name, "Dynamic carrier family disabled");
    }

    builder.build(config)
}
