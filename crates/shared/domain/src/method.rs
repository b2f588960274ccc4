//! Delivery method catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Every delivery method a carrier can offer.
///
/// The derived ordering is the catalog order: pickup point, address, direct address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    PickupPointDelivery,
    /// Packeta home delivery (formerly BDS).
    AddressDelivery,
    /// Home delivery through a specific external carrier.
    DirectAddressDelivery,
}

/// Ordered set of methods. Iteration follows the catalog order.
pub type MethodSet = BTreeSet<Method>;

impl Method {
    /// All methods in catalog order.
    pub const ALL: [Self; 3] =
        [Self::PickupPointDelivery, Self::AddressDelivery, Self::DirectAddressDelivery];

    #[must_use]
    pub fn all() -> MethodSet {
        Self::ALL.into_iter().collect()
    }

    /// `true` for address delivery and direct address delivery.
    #[must_use]
    pub const fn is_any_address_delivery(self) -> bool {
        matches!(self, Self::AddressDelivery | Self::DirectAddressDelivery)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PickupPointDelivery => "pickupPointDelivery",
            Self::AddressDelivery => "addressDelivery",
            Self::DirectAddressDelivery => "directAddressDelivery",
        }
    }

    /// Human label used when a family does not override it.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::PickupPointDelivery => "Pickup Point Delivery",
            Self::AddressDelivery => "Address Delivery",
            Self::DirectAddressDelivery => "Direct Address Delivery",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a catalog method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethodName(pub String);

impl fmt::Display for UnknownMethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown delivery method '{}'", self.0)
    }
}

impl std::error::Error for UnknownMethodName {}

impl FromStr for Method {
    type Err = UnknownMethodName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethodName(s.to_owned()))
    }
}
