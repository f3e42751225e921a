//! Host environment contracts.
//!
//! The video core never talks to a windowing system directly. It reads
//! metrics and schedules deferred work through [`Host`]; the adapter that owns
//! the real event subscriptions implements it.

mod defer;

pub use defer::{DeferQueue, DeferToken};

use std::time::Duration;

use crate::coords::ContainerSize;

/// Metrics and the task-deferral primitive provided by the host.
pub trait Host {
    /// Physical-to-logical pixel ratio of the display.
    fn pixel_ratio(&self) -> f64;

    /// Size of the whole viewport (window), in logical pixels.
    fn viewport_size(&self) -> ContainerSize;

    /// Size of the parent container, if the host has one and can measure it.
    fn parent_size(&self) -> Option<ContainerSize> {
        None
    }

    /// Schedules a one-shot callback. The host later hands `token` back to
    /// [`crate::video::Video::on_deferred`].
    fn defer(&mut self, delay: Duration) -> DeferToken;

    /// Cancels a scheduled callback. Cancelling an unknown token is a no-op.
    fn cancel(&mut self, token: DeferToken);
}
