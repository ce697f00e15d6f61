//! The fixed set of color screens

use serde::Serialize;

use crate::config::ScreensConfig;

/// One display panel
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub index: usize,
    pub theme_color: String,
}

impl Screen {
    /// Accessible label announced by screen readers
    pub fn aria_label(&self) -> String {
        format!("Color screen {}", self.index + 1)
    }
}

/// Ordered screens, defined once at startup and never resized
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScreenSet {
    screens: Vec<Screen>,
}

impl ScreenSet {
    /// Build the set from configuration
    pub fn from_config(config: &ScreensConfig) -> Self {
        let screens = config
            .theme_colors
            .iter()
            .enumerate()
            .map(|(index, color)| Screen {
                index,
                theme_color: color.clone(),
            })
            .collect();
        Self { screens }
    }

    /// Number of screens
    #[inline]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Screen at `index`
    pub fn get(&self, index: usize) -> Option<&Screen> {
        self.screens.get(index)
    }

    /// Theme color for `index`, if it exists
    pub fn theme_color(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.theme_color.as_str())
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }
}

impl Default for ScreenSet {
    fn default() -> Self {
        Self::from_config(&ScreensConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let set = ScreenSet::default();
        assert_eq!(set.len(), 5);
        assert_eq!(set.theme_color(0), Some("#ff6b6b"));
        assert_eq!(set.theme_color(4), Some("#a8edea"));
        assert_eq!(set.theme_color(5), None);
    }

    #[test]
    fn test_aria_labels_are_one_based() {
        let set = ScreenSet::default();
        let labels: Vec<String> = set.iter().map(Screen::aria_label).collect();
        assert_eq!(labels[0], "Color screen 1");
        assert_eq!(labels[4], "Color screen 5");
    }
}
