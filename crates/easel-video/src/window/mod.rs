//! winit adapter.
//!
//! Owns the event loop and window, subscribes to the host events the video
//! core cares about, and implements [`crate::host::Host`] over the window and
//! a [`crate::host::DeferQueue`].

mod host;
mod runtime;

pub use host::WindowHost;
pub use runtime::{Runtime, RuntimeConfig, VideoApp};
