//! Pipeline entry points for crawler operations.
//!
//! - `run_fetch`: Resolve the latest bulletin of each selected source

pub mod fetch;

pub use fetch::{FetchReport, SourceFailure, run_fetch};
