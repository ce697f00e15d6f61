//! 2D size type for dimensions

use serde::{Deserialize, Serialize};

/// 2D size for width and height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if size is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink both dimensions by `margin`, never below zero
    #[inline]
    pub fn shrink(self, margin: f64) -> Self {
        Self::new((self.width - margin).max(0.0), (self.height - margin).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_shrink() {
        let s = Size::new(400.0, 300.0).shrink(100.0);
        assert!((s.width - 300.0).abs() < 1e-9);
        assert!((s.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_size_shrink_saturates() {
        let s = Size::new(80.0, 300.0).shrink(100.0);
        assert_eq!(s.width, 0.0);
        assert!(s.is_empty());
    }
}
