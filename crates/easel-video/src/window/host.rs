use std::time::{Duration, Instant};

use winit::dpi::LogicalSize;
use winit::window::Window;

use crate::coords::ContainerSize;
use crate::host::{DeferQueue, DeferToken, Host};

/// [`Host`] backed by a winit window. Deferred callbacks go into `queue`;
/// the runtime delivers them once their deadline passes.
pub struct WindowHost<'a> {
    window: &'a Window,
    queue: &'a mut DeferQueue,
}

impl<'a> WindowHost<'a> {
    pub fn new(window: &'a Window, queue: &'a mut DeferQueue) -> Self {
        Self { window, queue }
    }
}

impl Host for WindowHost<'_> {
    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Inner window size in logical pixels.
    fn viewport_size(&self) -> ContainerSize {
        let logical: LogicalSize<f64> = self
            .window
            .inner_size()
            .to_logical(self.window.scale_factor());
        ContainerSize::new(logical.width, logical.height)
    }

    fn defer(&mut self, delay: Duration) -> DeferToken {
        self.queue.schedule(Instant::now(), delay)
    }

    fn cancel(&mut self, token: DeferToken) {
        self.queue.cancel(token);
    }
}
