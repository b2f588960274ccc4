use phub_domain::config::DestinationEntry;
use phub_domain::method::Method;
use std::collections::{BTreeMap, BTreeSet};

/// Static `(method, country) -> point id` lookup of a carrier family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationTable {
    points: BTreeMap<(Method, String), i64>,
}

impl DestinationTable {
    pub fn new(entries: impl IntoIterator<Item = (Method, String, i64)>) -> Self {
        Self {
            points: entries
                .into_iter()
                .map(|(method, country, point_id)| ((method, country), point_id))
                .collect(),
        }
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a DestinationEntry>) -> Self {
        Self::new(entries.into_iter().map(|e| (e.method, e.country.clone(), e.point_id)))
    }

    #[must_use]
    pub fn point_id(&self, method: Method, country: &str) -> Option<i64> {
        self.points.get(&(method, country.to_owned())).copied()
    }

    /// Every point id the table declares.
    #[must_use]
    pub fn point_ids(&self) -> BTreeSet<i64> {
        self.points.values().copied().collect()
    }

    /// Countries with a mapping for `method`.
    pub fn countries(&self, method: Method) -> impl Iterator<Item = &str> {
        self.points.keys().filter(move |(m, _)| *m == method).map(|(_, country)| country.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_method_and_country() {
        let table = DestinationTable::new([
            (Method::AddressDelivery, "CZ".to_owned(), 106),
            (Method::AddressDelivery, "SK".to_owned(), 131),
        ]);

        assert_eq!(table.point_id(Method::AddressDelivery, "SK"), Some(131));
        assert_eq!(table.point_id(Method::PickupPointDelivery, "SK"), None);
        assert_eq!(table.point_id(Method::AddressDelivery, "PL"), None);
        assert_eq!(table.point_ids(), BTreeSet::from([106, 131]));
        assert_eq!(table.countries(Method::AddressDelivery).collect::<Vec<_>>(), vec!["CZ", "SK"]);
        assert!(table.countries(Method::DirectAddressDelivery).next().is_none());
        assert!(DestinationTable::default().is_empty());
    }
}
