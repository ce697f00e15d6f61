//! Keyboard lockdown policy

use serde::{Deserialize, Serialize};

/// A key press with its modifier state, as reported by `KeyboardEvent.key`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS
    #[inline]
    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Why a key press was swallowed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReason {
    /// Would leave, reload or switch away from the page
    Navigation,
    /// Browser zoom shortcut
    Zoom,
}

/// Decides which key presses the kiosk swallows
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyFilter;

impl KeyFilter {
    /// Keys blocked with no modifier at all
    const BARE: [&'static str; 4] = ["Escape", "F5", "F11", "Tab"];

    /// Letters blocked together with Ctrl or Cmd (reload, close tab, new tab)
    const COMMAND_LETTERS: [&'static str; 3] = ["r", "w", "t"];

    /// Zoom keys blocked together with Ctrl or Cmd
    const ZOOM: [&'static str; 3] = ["+", "-", "0"];

    pub fn should_block(&self, chord: &KeyChord) -> Option<BlockReason> {
        let key = chord.key.as_str();

        if Self::BARE.contains(&key) {
            return Some(BlockReason::Navigation);
        }
        if chord.command() {
            let lower = key.to_ascii_lowercase();
            if Self::COMMAND_LETTERS.contains(&lower.as_str()) {
                return Some(BlockReason::Navigation);
            }
            if Self::ZOOM.contains(&key) {
                return Some(BlockReason::Zoom);
            }
        }
        None
    }
}
