//! In-memory doubles for the platform traits.
//!
//! Used by this crate's tests and by the browser crates' native tests.

mod capabilities;
mod memory_caches;
mod memory_network;
mod random;

pub use capabilities::ScriptedCapabilities;
pub use memory_caches::{MemoryCaches, MemoryResponse};
pub use memory_network::{MemoryNetwork, RecordingScope};
pub use random::SequenceRandom;
