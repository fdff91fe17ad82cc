use serde::{Deserialize, Serialize};

/// The fixed node palette. Colors are assigned at creation time by
/// `palette_index % PALETTE.len()`, so two editors fed the same insertion
/// sequence produce the same coloring.
pub const PALETTE: [&str; 10] = [
    "#3b82f6", // blue
    "#8b5cf6", // purple
    "#10b981", // green
    "#f59e0b", // yellow
    "#ef4444", // red
    "#06b6d4", // cyan
    "#f97316", // orange
    "#84cc16", // lime
    "#ec4899", // pink
    "#6366f1", // indigo
];

/// Fill color for the START sentinel.
pub const START_COLOR: &str = "#10b981";
/// Fill color for the END sentinel.
pub const END_COLOR: &str = "#ef4444";

/// A `#rrggbb` hex color. Stored as the raw string so snapshots
/// round-trip byte-identically with the browser exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Deterministic palette lookup, wrapping on overflow.
    pub fn by_index(index: usize) -> Self {
        Self(PALETTE[index % PALETTE.len()].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the `#rrggbb` channels. Returns `None` for malformed
    /// strings; renderers fall back to a neutral gray in that case.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Scales each channel toward black, used for node borders.
    /// Malformed colors are returned unchanged.
    pub fn darken(&self, amount: f32) -> Self {
        let Some((r, g, b)) = self.rgb() else {
            return self.clone();
        };
        let scale = |c: u8| ((c as f32) * (1.0 - amount)).round().max(0.0) as u8;
        Self(format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b)))
    }
}

impl From<&str> for Color {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}
