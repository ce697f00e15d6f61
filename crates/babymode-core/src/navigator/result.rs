//! Navigation result type

use serde::Serialize;

/// What the view should do after a navigator call
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavResult {
    /// Nothing to render; the event may keep its default behavior
    Ignored,
    /// A touch was captured; drop the container transition so it tracks the finger
    Armed,
    /// Follow the finger
    Drag {
        /// Container offset in percent
        offset: f64,
    },
    /// Animate to a resting position
    Settle {
        /// Active screen after the gesture
        index: usize,
        /// Whether the active screen changed
        changed: bool,
        /// Container offset in percent
        offset: f64,
    },
}

impl NavResult {
    /// Active index if the navigator settled
    #[inline]
    pub fn settled_index(&self) -> Option<usize> {
        match self {
            NavResult::Settle { index, .. } => Some(*index),
            _ => None,
        }
    }
}
