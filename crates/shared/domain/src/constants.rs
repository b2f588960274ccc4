//! Well-known family names and the built-in Packeta destination data.

/// Statically implemented Packeta family.
pub const PACKETERY: &str = "Packetery";
/// Generic family aggregating feed-sourced carriers.
pub const PACKETA_DYNAMIC: &str = "PacketeryPacketaDynamic";

/// Settings path prefix; carrier settings live under `carriers/<code>`.
pub const CARRIERS_PATH: &str = "carriers";

/// Countries with Packeta pickup point coverage.
pub const PICKUP_POINT_COUNTRIES: [&str; 4] = ["CZ", "SK", "HU", "RO"];

/// Packeta home delivery carrier ids per country.
pub const ADDRESS_DELIVERY_POINTS: [(&str, i64); 4] =
    [("CZ", 106), ("SK", 131), ("HU", 4159), ("RO", 4161)];
