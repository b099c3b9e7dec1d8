//! Cassette files: recorded image-service interactions replayed in tests.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
