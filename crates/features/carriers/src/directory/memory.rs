use crate::directory::{CarrierQuery, DirectoryError, DynamicCarrierStore};
use parking_lot::RwLock;
use phub_domain::record::DynamicCarrierRecord;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// In-memory [`DynamicCarrierStore`], keyed and ordered by record id.
#[derive(Debug, Default)]
pub struct MemoryCarrierStore {
    records: RwLock<BTreeMap<i64, DynamicCarrierRecord>>,
}

impl MemoryCarrierStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a feed snapshot. On duplicate ids the last record wins.
    pub fn from_records(records: impl IntoIterator<Item = DynamicCarrierRecord>) -> Self {
        let store = Self::new();
        for record in records {
            let id = record.id;
            if store.upsert(record).is_some() {
                warn!(id, "Duplicate dynamic carrier id in feed snapshot, keeping the last one");
            }
        }
        store
    }

    /// Decodes a JSON array of records (camelCase fields).
    ///
    /// # Errors
    /// [`DirectoryError::Serialize`] when the snapshot is not a valid record array.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let records: Vec<DynamicCarrierRecord> = serde_json::from_str(json)?;
        debug!(records = records.len(), "Decoded dynamic carrier feed snapshot");
        Ok(Self::from_records(records))
    }

    /// Inserts or replaces a record, returning the replaced one.
    pub fn upsert(&self, record: DynamicCarrierRecord) -> Option<DynamicCarrierRecord> {
        self.records.write().insert(record.id, record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl DynamicCarrierStore for MemoryCarrierStore {
    fn query(&self, query: &CarrierQuery) -> Result<Vec<DynamicCarrierRecord>, DirectoryError> {
        Ok(self.records.read().values().filter(|r| query.matches(r)).cloned().collect())
    }

    fn update_name(&self, query: &CarrierQuery, name: &str) -> Result<usize, DirectoryError> {
        let mut records = self.records.write();
        let mut touched = 0;
        for record in records.values_mut().filter(|r| query.matches(r)) {
            record.carrier_name = name.to_owned();
            touched += 1;
        }
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phub_domain::method::Method;

    #[test]
    fn last_duplicate_wins() {
        let store = MemoryCarrierStore::from_records([
            DynamicCarrierRecord::new(5, "DE", Method::DirectAddressDelivery, "DHL"),
            DynamicCarrierRecord::new(5, "DE", Method::DirectAddressDelivery, "DHL Express"),
        ]);
        assert_eq!(store.len(), 1);
        let records = store.query(&CarrierQuery::by_id(5)).expect("query");
        assert_eq!(records[0].carrier_name, "DHL Express");
    }

    #[test]
    fn decodes_feed_json() {
        let store = MemoryCarrierStore::from_json(
            r#"[
                {"id": 7, "country": "CZ", "method": "addressDelivery", "carrierName": "CZ Home"},
                {"id": 9, "country": "SK", "method": "pickupPointDelivery", "carrierName": "SK Box", "deleted": true}
            ]"#,
        )
        .expect("valid snapshot");
        assert_eq!(store.len(), 2);

        let err = MemoryCarrierStore::from_json("{").expect_err("broken json");
        assert_eq!(err.kind(), "Serialize");
    }

    #[test]
    fn update_name_counts_rows() {
        let store = MemoryCarrierStore::from_records([DynamicCarrierRecord::new(
            7,
            "CZ",
            Method::AddressDelivery,
            "CZ Home",
        )]);
        assert_eq!(store.update_name(&CarrierQuery::by_id(7), "Renamed").expect("update"), 1);
        assert_eq!(store.update_name(&CarrierQuery::by_id(8), "Nobody").expect("update"), 0);
        assert!(!store.is_empty());
    }
}
