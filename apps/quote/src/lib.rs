//! # ParcelHub Quote
//!
//! Loads the shipping configuration and a dynamic carrier feed snapshot, then collects
//! the offers of every registered carrier for one destination.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use phub_quote::{Quote, QuoteArgs};
//!
//! fn main() -> anyhow::Result<()> {
//!     let args = QuoteArgs::parse_from(["phub-quote", "--country", "CZ", "--weight", "1.5"]);
//!     let report = Quote::from_args(&args)?.run(&args)?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use phub::carriers::{CarrierFacade, FlatPricing, MemoryCarrierStore};
use phub::domain::config::ShippingConfig;
use phub::domain::rate::{RateOutcome, RateRequest};
use phub::kernel::config::load_config;
use phub::kernel::settings::Scope;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command line of `phub-quote`.
#[derive(Debug, Clone, Parser)]
#[command(name = "phub-quote", version, about = "Collect shipping offers for one destination")]
pub struct QuoteArgs {
    /// Shipping config file; built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON array of dynamic carrier records.
    #[arg(long)]
    pub feed: Option<PathBuf>,
    /// Destination country (ISO 3166-1 alpha-2).
    #[arg(long)]
    pub country: String,
    /// Package weight in kilograms.
    #[arg(long, default_value_t = 1.0)]
    pub weight: f64,
    /// Store scope to read carrier settings from.
    #[arg(long)]
    pub store: Option<String>,
    /// Quote as a split shipment checkout (every carrier abstains).
    #[arg(long)]
    pub split_shipment: bool,
    /// Flat price per offer.
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
}

/// Offers per carrier code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub request: RateRequest,
    pub carriers: BTreeMap<String, RateOutcome>,
}

/// A ready-to-query carrier facade plus the config it was built from.
#[derive(Debug, Clone)]
pub struct Quote {
    config: ShippingConfig,
    facade: CarrierFacade,
}

/// Reads the shipping config named by `args`, or the built-in defaults.
///
/// # Errors
/// Missing or malformed config file.
pub fn load_shipping_config(args: &QuoteArgs) -> Result<ShippingConfig> {
    match &args.config {
        Some(path) => load_config(Some(path)).context("Configuration is malformed"),
        None => Ok(ShippingConfig::default()),
    }
}

impl Quote {
    /// Loads config and feed as named by `args` and builds the facade.
    ///
    /// # Errors
    /// Unreadable or malformed config or feed, or a carrier setup failure.
    pub fn from_args(args: &QuoteArgs) -> Result<Self> {
        Self::new(load_shipping_config(args)?, args)
    }

    /// Loads the feed named by `args` and builds the facade over `config`.
    ///
    /// # Errors
    /// Unreadable or malformed feed, or a carrier setup failure.
    pub fn new(config: ShippingConfig, args: &QuoteArgs) -> Result<Self> {
        let store = match &args.feed {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read feed {}", path.display()))?;
                MemoryCarrierStore::from_json(&raw).context("Feed snapshot is malformed")?
            },
            None => MemoryCarrierStore::new(),
        };
        info!(records = store.len(), "Dynamic carrier feed loaded");

        let scope = args.store.clone().map_or(Scope::Default, Scope::Store);
        let facade =
            phub::init(&config, scope, Arc::new(store), Arc::new(FlatPricing::new(args.price)))
                .context("Failed to set up carriers")?;

        Ok(Self { config, facade })
    }

    #[must_use]
    pub const fn config(&self) -> &ShippingConfig {
        &self.config
    }

    #[must_use]
    pub const fn facade(&self) -> &CarrierFacade {
        &self.facade
    }

    /// Collects the offers for the destination in `args`.
    ///
    /// # Errors
    /// Carrier failures (directory, pricing, unknown labels).
    pub fn run(&self, args: &QuoteArgs) -> Result<QuoteReport> {
        let request = RateRequest::new(args.country.to_uppercase(), args.weight)
            .with_split_shipment(args.split_shipment);
        let carriers = self.facade.collect_rates(&request).context("Rate collection failed")?;
        Ok(QuoteReport { request, carriers })
    }
}
