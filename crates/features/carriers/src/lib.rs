//! # Carriers
//!
//! Rate collection and dynamic carrier resolution.
//!
//! * **[`Brain`]**: per-family behavior (eligibility, method filtering, point resolution).
//!   [`StaticBrain`] serves families described as data; [`DynamicBrain`] aggregates every
//!   feed-sourced carrier not owned by a static family.
//! * **[`Carrier`]**: one brain plus the [`CarrierConfig`] it built; what hosts address by code.
//! * **[`CarrierFacade`]**: carrier lookup, hybrid views, exclusivity bookkeeping, country
//!   discovery and renaming.
//! * **[`DynamicCarrierDirectory`]**: queries over a [`DynamicCarrierStore`].
//! * **[`PricingService`]**: the pricing collaborator; this crate never computes money.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use phub_carriers::{CarrierFacade, FlatPricing, MemoryCarrierStore};
//! use phub_domain::config::{FamilyConfig, ShippingConfig};
//! use phub_domain::method::Method;
//! use phub_domain::rate::RateRequest;
//! use phub_domain::record::DynamicCarrierRecord;
//!
//! # fn main() -> Result<(), phub_carriers::CarrierError> {
//! let store = MemoryCarrierStore::from_records([DynamicCarrierRecord::new(
//!     5,
//!     "DE",
//!     Method::DirectAddressDelivery,
//!     "DHL",
//! )]);
//!
//! let facade = CarrierFacade::builder(Arc::new(FlatPricing::new(4.5)))
//!     .static_family(&FamilyConfig::packetery())
//!     .dynamic_family("PacketeryPacketaDynamic", Arc::new(store))
//!     .build(&ShippingConfig::default())?;
//!
//! let outcome = facade
//!     .carrier("packeteryPacketaDynamic")?
//!     .collect_rates(&RateRequest::new("DE", 2.0))?;
//! assert_eq!(outcome.rates().map(|r| r.len()), Some(1));
//! # Ok(())
//! # }
//! ```

mod brain;
mod carrier;
mod config;
mod directory;
mod error;
mod facade;
mod hybrid;
mod method_select;
mod pricing;

pub use brain::{Brain, DestinationTable, DynamicBrain, StaticBrain, carrier_code_for};
pub use carrier::Carrier;
pub use config::{CarrierConfig, DynamicConfig};
pub use directory::{
    CarrierQuery, DirectoryError, DirectoryErrorExt, DynamicCarrierDirectory, DynamicCarrierStore,
    MemoryCarrierStore,
};
pub use error::{CarrierError, CarrierErrorExt};
pub use facade::{CarrierFacade, CarrierFacadeBuilder};
pub use hybrid::HybridCarrier;
pub use method_select::MethodSelect;
pub use pricing::{FlatPricing, MethodLabels, PricingError, PricingErrorExt, PricingService};
