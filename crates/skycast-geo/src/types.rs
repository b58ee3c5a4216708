use serde::{Deserialize, Serialize};

/// A resolved geographic point with identity, display fields, and coordinates.
///
/// Immutable once constructed. The display label is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable per provider result, or derived from coordinates.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Region / first-level administrative subdivision.
    #[serde(default)]
    pub admin1: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Display label: name, then region if non-empty, then country if
    /// non-empty, joined by ", ".
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if !self.admin1.is_empty() {
            parts.push(self.admin1.as_str());
        }
        if !self.country.is_empty() {
            parts.push(self.country.as_str());
        }
        parts.join(", ")
    }

    /// Build a location directly from device coordinates.
    ///
    /// The identifier is derived deterministically from the coordinates at
    /// 5-decimal precision, and the display name embeds the same values.
    /// No external lookup is involved.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            id: format!("{:.5},{:.5}", latitude, longitude),
            name: format!("Point {:.5}, {:.5}", latitude, longitude),
            country: String::new(),
            admin1: String::new(),
            latitude,
            longitude,
        }
    }
}
