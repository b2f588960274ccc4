//! Scoped settings lookup.
//!
//! Carrier settings live under `carriers/<code>` in the default scope and may be
//! overridden per store, field by field. Carrier codes compare case-insensitively.

use phub_domain::config::{CarrierSettings, ShippingConfig};
use phub_domain::constants::CARRIERS_PATH;
use std::collections::BTreeMap;
use std::fmt;

/// Where a setting is read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Default,
    /// A store view; unset fields fall back to the default scope.
    Store(String),
}

impl Scope {
    pub fn store(code: impl Into<String>) -> Self {
        Self::Store(code.into())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Store(code) => write!(f, "store:{code}"),
        }
    }
}

/// Read access to scoped carrier settings.
pub trait ScopedSettings: fmt::Debug + Send + Sync {
    /// Looks up the settings at `path` (`carriers/<code>`) for `scope`.
    ///
    /// Returns `None` when neither the default scope nor the store scope knows the path.
    fn get_value(&self, path: &str, scope: &Scope) -> Option<CarrierSettings>;
}

impl ScopedSettings for ShippingConfig {
    fn get_value(&self, path: &str, scope: &Scope) -> Option<CarrierSettings> {
        let code = carrier_code_from_path(path)?;
        let base = lookup(&self.carriers, code);

        let store = match scope {
            Scope::Default => None,
            Scope::Store(store) => {
                self.stores.get(store).and_then(|settings| lookup(&settings.carriers, code))
            },
        };

        match (base, store) {
            (Some(base), Some(store)) => Some(base.overlay(store)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

/// Builds the settings path of a carrier code.
#[must_use]
pub fn carrier_path(code: &str) -> String {
    format!("{CARRIERS_PATH}/{code}")
}

fn carrier_code_from_path(path: &str) -> Option<&str> {
    let (prefix, code) = path.split_once('/')?;
    (prefix == CARRIERS_PATH && !code.is_empty()).then_some(code)
}

fn lookup<'a>(
    carriers: &'a BTreeMap<String, CarrierSettings>,
    code: &str,
) -> Option<&'a CarrierSettings> {
    carriers.get(code).or_else(|| {
        carriers.iter().find(|(key, _)| key.eq_ignore_ascii_case(code)).map(|(_, value)| value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parsing() {
        assert_eq!(carrier_code_from_path("carriers/packetery"), Some("packetery"));
        assert_eq!(carrier_code_from_path("carriers/"), None);
        assert_eq!(carrier_code_from_path("payments/packetery"), None);
        assert_eq!(carrier_code_from_path("packetery"), None);
        assert_eq!(carrier_path("packetery"), "carriers/packetery");
    }

    #[test]
    fn scope_display() {
        assert_eq!(Scope::Default.to_string(), "default");
        assert_eq!(Scope::store("eu").to_string(), "store:eu");
    }
}
