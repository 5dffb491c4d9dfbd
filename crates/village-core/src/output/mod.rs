//! Output Generation
//!
//! Snapshot generation and state output.

pub mod schemas;
pub mod snapshot;

pub use schemas::*;
pub use snapshot::*;
