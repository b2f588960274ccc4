use crate::error::CarrierError;
use crate::pricing::MethodLabels;
use phub_domain::method::{Method, MethodSet};
use std::collections::BTreeMap;

/// The methods a carrier family can offer in principle, with their labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSelect {
    labels: BTreeMap<Method, String>,
}

impl MethodSelect {
    /// Capability set labelled with [`Method::default_label`].
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            labels: methods.into_iter().map(|m| (m, m.default_label().to_owned())).collect(),
        }
    }

    /// Every catalog method.
    #[must_use]
    pub fn all() -> Self {
        Self::new(Method::ALL)
    }

    /// Overrides the label of a method; methods outside the capability set are ignored.
    #[must_use]
    pub fn with_label(mut self, method: Method, label: impl Into<String>) -> Self {
        if let Some(current) = self.labels.get_mut(&method) {
            *current = label.into();
        }
        self
    }

    #[must_use]
    pub fn methods(&self) -> MethodSet {
        self.labels.keys().copied().collect()
    }

    /// # Errors
    /// [`CarrierError::UnknownMethod`] when `method` is outside the capability set.
    pub fn label(&self, method: Method) -> Result<&str, CarrierError> {
        self.labels.get(&method).map(String::as_str).ok_or_else(|| CarrierError::UnknownMethod {
            message: format!("'{method}' is not offered by this carrier family").into(),
            context: None,
        })
    }

    /// Labels every method in `methods`.
    ///
    /// # Errors
    /// [`CarrierError::UnknownMethod`] on the first method outside the capability set.
    pub fn labels_for(
        &self,
        methods: impl IntoIterator<Item = Method>,
    ) -> Result<MethodLabels, CarrierError> {
        methods
            .into_iter()
            .map(|m| -> Result<_, CarrierError> { Ok((m, self.label(m)?.to_owned())) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_within_capability() {
        let select = MethodSelect::new([Method::PickupPointDelivery, Method::AddressDelivery])
            .with_label(Method::AddressDelivery, "Packeta Home")
            .with_label(Method::DirectAddressDelivery, "ignored");

        assert_eq!(select.label(Method::AddressDelivery).ok(), Some("Packeta Home"));
        assert_eq!(select.label(Method::PickupPointDelivery).ok(), Some("Pickup Point Delivery"));
        let err = select.label(Method::DirectAddressDelivery).expect_err("outside capability");
        assert_eq!(err.kind(), "UnknownMethod");
        assert_eq!(select.methods().len(), 2);
    }

    #[test]
    fn labels_for_fails_on_first_unknown() {
        let select = MethodSelect::new([Method::PickupPointDelivery]);
        assert!(select.labels_for([Method::PickupPointDelivery]).is_ok());
        assert!(select.labels_for([Method::PickupPointDelivery, Method::AddressDelivery]).is_err());
        assert_eq!(MethodSelect::all().methods(), Method::all());
    }
}
