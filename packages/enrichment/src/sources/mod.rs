//! Event source implementations.

mod tracker;

pub use tracker::{CpwTrackerSource, DEFAULT_TRACKER_URL, RAPIDAPI_KEY_VAR};
