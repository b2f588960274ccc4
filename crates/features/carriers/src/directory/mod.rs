//! Dynamic carrier directory.
//!
//! Query and lookup over the externally populated dynamic carrier records. Records owned
//! by a statically implemented family (the exclusivity set) are never handed to the
//! dynamic brain for resolution or configuration.

mod error;
mod memory;
mod store;

pub use error::{DirectoryError, DirectoryErrorExt};
pub use memory::MemoryCarrierStore;
pub use store::{CarrierQuery, DynamicCarrierStore};

use phub_domain::method::MethodSet;
use phub_domain::record::DynamicCarrierRecord;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DynamicCarrierDirectory {
    store: Arc<dyn DynamicCarrierStore>,
    exclusivity: Arc<BTreeSet<i64>>,
}

impl DynamicCarrierDirectory {
    /// `exclusivity` holds the ids owned by statically implemented families.
    pub fn new(store: Arc<dyn DynamicCarrierStore>, exclusivity: BTreeSet<i64>) -> Self {
        Self { store, exclusivity: Arc::new(exclusivity) }
    }

    #[must_use]
    pub fn exclusivity(&self) -> &BTreeSet<i64> {
        &self.exclusivity
    }

    /// Every record outside the exclusivity set.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn find_resolvable(&self) -> Result<Vec<DynamicCarrierRecord>, DirectoryError> {
        let records = self.store.query(&CarrierQuery::default().excluding(&self.exclusivity))?;
        debug!(records = records.len(), "Enumerated resolvable dynamic carriers");
        Ok(records)
    }

    /// Records in `country` offering any of `methods`, outside the exclusivity set.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn find_configurable(
        &self,
        country: &str,
        methods: &MethodSet,
    ) -> Result<Vec<DynamicCarrierRecord>, DirectoryError> {
        let query = CarrierQuery::default()
            .in_country(country)
            .for_methods(methods)
            .excluding(&self.exclusivity);
        self.store.query(&query)
    }

    /// # Errors
    /// Propagates store failures.
    pub fn find_by_id(&self, id: i64) -> Result<Option<DynamicCarrierRecord>, DirectoryError> {
        Ok(self.store.query(&CarrierQuery::by_id(id))?.into_iter().next())
    }

    /// Distinct countries across all records offering any of `methods`.
    ///
    /// Not exclusivity-filtered: it answers whether any carrier at all serves the
    /// method and country.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn available_countries(
        &self,
        methods: &MethodSet,
    ) -> Result<BTreeSet<String>, DirectoryError> {
        let records = self.store.query(&CarrierQuery::default().for_methods(methods))?;
        Ok(records.into_iter().map(|r| r.country).collect())
    }

    /// # Errors
    /// [`DirectoryError::NotFound`] when no record has `id`.
    pub fn rename(&self, id: i64, name: &str) -> Result<(), DirectoryError> {
        let touched = self.store.update_name(&CarrierQuery::by_id(id), name)?;
        if touched == 0 {
            return Err(DirectoryError::NotFound {
                message: format!("no dynamic carrier with id {id}").into(),
                context: Some("rename".into()),
            });
        }

        debug!(id, name, "Renamed dynamic carrier");
        Ok(())
    }
}
