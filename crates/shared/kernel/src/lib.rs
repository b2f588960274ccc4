//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading and the scoped settings lookup
//! that carrier configs are built from.
//!
//! ## Config loading
//! ```rust,no_run
//! use phub_kernel::config::load_config;
//! use phub_kernel::domain::config::ShippingConfig;
//!
//! let cfg: ShippingConfig = load_config(Some("config/shipping")).unwrap_or_default();
//! ```
//!
//! ## Scoped settings
//! ```rust
//! use phub_kernel::settings::{Scope, ScopedSettings};
//! use phub_kernel::domain::config::ShippingConfig;
//!
//! let cfg = ShippingConfig::default();
//! let settings = cfg.get_value("carriers/packetery", &Scope::Default).unwrap();
//! assert_eq!(settings.active, Some(true));
//! ```
pub mod config;
pub mod settings;

pub use phub_domain as domain;
