//! Experiment persistence.
//!
//! The dispatcher hands its assembled results to an [`ExperimentStore`] once every model
//! has finished. Stores assign ids and timestamps; a failed write leaves nothing behind.

#[path = "store/types.rs"]
mod types;

#[path = "store/traits.rs"]
mod traits;

#[path = "store/memory.rs"]
mod memory;

#[path = "store/json_file.rs"]
mod json_file;

pub use json_file::JsonExperimentStore;
pub use memory::MemoryExperimentStore;
pub use traits::{ExperimentStore, SharedStore};
pub use types::{Experiment, NewExperiment};
