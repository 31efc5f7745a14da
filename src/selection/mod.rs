//! Selection tracking
//!
//! ## Modules
//!
//! - `snapshot`: The immutable captured selection
//! - `tracker`: Capture from the page or from externally supplied text

pub mod snapshot;
pub mod tracker;

pub use snapshot::{CaptureTrigger, HostSnapshot, SelectionSnapshot, SnapshotInfo};
pub use tracker::{SelectionTracker, TrackerState};
