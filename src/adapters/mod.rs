//! Implementations of the [`ImageGenerator`](crate::ports::ImageGenerator) port.
//!
//! - `live/`: calls the image service
//! - `recording/`: wraps a live generator and writes a cassette
//! - `replaying/`: serves a cassette with no network I/O

pub mod live;
pub mod recording;
pub mod replaying;
