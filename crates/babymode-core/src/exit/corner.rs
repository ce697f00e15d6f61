//! Screen corners and their hit zones

use serde::{Deserialize, Serialize};

use crate::math::Size;

/// One of the four screen corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Clockwise from the top-left
    pub const DEFAULT_PATTERN: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Stable label, matching the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    /// Check whether `(x, y)` lies in this corner's `zone`-sized square.
    ///
    /// Zone edges are inclusive.
    pub fn contains(self, x: f64, y: f64, viewport: Size, zone: f64) -> bool {
        let left = match self {
            Corner::TopLeft | Corner::BottomLeft => 0.0,
            Corner::TopRight | Corner::BottomRight => viewport.width - zone,
        };
        let top = match self {
            Corner::TopLeft | Corner::TopRight => 0.0,
            Corner::BottomLeft | Corner::BottomRight => viewport.height - zone,
        };
        x >= left && x <= left + zone && y >= top && y <= top + zone
    }

    /// First corner (in [`Corner::ALL`] order) whose zone contains the point
    pub fn at(x: f64, y: f64, viewport: Size, zone: f64) -> Option<Corner> {
        Corner::ALL
            .into_iter()
            .find(|corner| corner.contains(x, y, viewport, zone))
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
