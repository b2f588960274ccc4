use crate::method::Method;
use serde::{Deserialize, Serialize};

/// One feed-sourced carrier instance.
///
/// Records are written by the feed import and only read (or renamed) here.
/// A record offers exactly one [`Method`] in exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicCarrierRecord {
    /// Stable primary key; doubles as the destination point id.
    pub id: i64,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub method: Method,
    pub carrier_name: String,
    /// Soft-delete flag set by the feed import.
    #[serde(default)]
    pub deleted: bool,
}

impl DynamicCarrierRecord {
    pub fn new(
        id: i64,
        country: impl Into<String>,
        method: Method,
        carrier_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            country: country.into(),
            method,
            carrier_name: carrier_name.into(),
            deleted: false,
        }
    }

    #[must_use]
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }
}
