use crate::directory::DirectoryError;
use phub_domain::method::MethodSet;
use phub_domain::record::DynamicCarrierRecord;
use std::collections::BTreeSet;
use std::fmt;

/// Filter over dynamic carrier records. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierQuery {
    pub ids: Option<BTreeSet<i64>>,
    pub exclude_ids: BTreeSet<i64>,
    pub country: Option<String>,
    /// Records whose method is any of these.
    pub methods: Option<MethodSet>,
}

impl CarrierQuery {
    #[must_use]
    pub fn by_id(id: i64) -> Self {
        Self { ids: Some(BTreeSet::from([id])), ..Self::default() }
    }

    #[must_use]
    pub fn excluding(mut self, ids: &BTreeSet<i64>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    #[must_use]
    pub fn in_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn for_methods(mut self, methods: &MethodSet) -> Self {
        self.methods = Some(methods.clone());
        self
    }

    #[must_use]
    pub fn matches(&self, record: &DynamicCarrierRecord) -> bool {
        self.ids.as_ref().is_none_or(|ids| ids.contains(&record.id))
            && !self.exclude_ids.contains(&record.id)
            && self.country.as_deref().is_none_or(|country| record.country == country)
            && self.methods.as_ref().is_none_or(|methods| methods.contains(&record.method))
    }
}

/// The externally populated collection of dynamic carrier records.
///
/// Reads return snapshots. Renames are administrative and never overlap rate collection.
pub trait DynamicCarrierStore: fmt::Debug + Send + Sync {
    /// # Errors
    /// Store-specific failures.
    fn query(&self, query: &CarrierQuery) -> Result<Vec<DynamicCarrierRecord>, DirectoryError>;

    /// Sets `carrier_name` on every record matching `query`; returns the number of rows touched.
    ///
    /// # Errors
    /// Store-specific failures.
    fn update_name(&self, query: &CarrierQuery, name: &str) -> Result<usize, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use phub_domain::method::Method;

    #[test]
    fn criteria_combine() {
        let record = DynamicCarrierRecord::new(7, "CZ", Method::AddressDelivery, "CZ Home");

        assert!(CarrierQuery::default().matches(&record));
        assert!(CarrierQuery::by_id(7).matches(&record));
        assert!(!CarrierQuery::by_id(8).matches(&record));
        assert!(!CarrierQuery::by_id(7).excluding(&BTreeSet::from([7])).matches(&record));
        assert!(!CarrierQuery::default().in_country("SK").matches(&record));
        assert!(
            CarrierQuery::default()
                .in_country("CZ")
                .for_methods(&MethodSet::from([
                    Method::PickupPointDelivery,
                    Method::AddressDelivery,
                ]))
                .matches(&record)
        );
        assert!(!CarrierQuery::default().for_methods(&MethodSet::new()).matches(&record));
    }
}
