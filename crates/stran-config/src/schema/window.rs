//! Top-level window placement.

use serde::{Deserialize, Serialize};
use stran_common::Geometry;

/// Initial geometry of the first window and cascade offset for later ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub x: i32,
    pub y: i32,
    /// Valid range: 200-10000.
    pub width: u32,
    /// Valid range: 200-10000.
    pub height: u32,
    /// Offset applied to a window opened from another window (valid range: 0-200).
    pub cascade_offset: i32,
}

impl WindowConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 800,
            height: 600,
            cascade_offset: 20,
        }
    }
}
