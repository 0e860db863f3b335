//! Call recording and cassette snapshots.

pub mod format;
pub mod recorder;
