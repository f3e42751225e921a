//! Easel video crate.
//!
//! Display surface lifecycle for a 2D engine: backend selection with software
//! fallback, design-resolution scaling under changing container sizes, and
//! debounced resize coordination.

pub mod backend;
pub mod coords;
pub mod host;
pub mod logging;
pub mod options;
pub mod policy;
pub mod video;
pub mod window;

mod error;

#[cfg(test)]
mod testing;

pub use error::VideoError;
pub use options::VideoOptions;
pub use video::{Notification, Video};
