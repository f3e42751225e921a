//! Test doubles for the host and backend contracts.

use std::cell::Cell;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::backend::{
    BlendMode, PresentationTarget, SoftwareSurface, SurfaceHandle, SurfaceKind, SurfaceProvider,
};
use crate::coords::{ContainerSize, PresentedSize, SurfaceSize};
use crate::host::{DeferToken, Host};
use crate::options::VideoOptions;

/// Host with fixed metrics that records every defer/cancel call.
#[derive(Debug)]
pub(crate) struct MockHost {
    pixel_ratio: f64,
    viewport: ContainerSize,
    parent: Option<ContainerSize>,
    next_token: u64,
    scheduled: Vec<DeferToken>,
    delays: Vec<Duration>,
    cancelled: Vec<DeferToken>,
}

impl MockHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pixel_ratio: 1.0,
            viewport: ContainerSize::new(width, height),
            parent: None,
            next_token: 0,
            scheduled: Vec::new(),
            delays: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn with_parent(mut self, width: f64, height: f64) -> Self {
        self.parent = Some(ContainerSize::new(width, height));
        self
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = ContainerSize::new(width, height);
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    pub fn scheduled(&self) -> &[DeferToken] {
        &self.scheduled
    }

    pub fn last_scheduled(&self) -> Option<DeferToken> {
        self.scheduled.last().copied()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    pub fn cancelled(&self) -> &[DeferToken] {
        &self.cancelled
    }
}

impl Host for MockHost {
    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn viewport_size(&self) -> ContainerSize {
        self.viewport
    }

    fn parent_size(&self) -> Option<ContainerSize> {
        self.parent
    }

    fn defer(&mut self, delay: Duration) -> DeferToken {
        self.next_token += 1;
        let token = DeferToken::from_raw(self.next_token);
        self.scheduled.push(token);
        self.delays.push(delay);
        token
    }

    fn cancel(&mut self, token: DeferToken) {
        self.cancelled.push(token);
    }
}

/// Stand-in for a GPU surface.
#[derive(Debug)]
pub(crate) struct MockGpuSurface {
    size: SurfaceSize,
    target: PresentationTarget,
}

impl SurfaceHandle for MockGpuSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Accelerated
    }

    fn resize(&mut self, size: SurfaceSize) {
        if !size.is_empty() {
            self.size = size;
        }
    }

    fn update_bounds(&mut self) {
        let presented = self.target.presented_size();
        self.target.set_bounds(presented);
    }

    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }

    fn presentation_target(&self) -> &PresentationTarget {
        &self.target
    }

    fn presentation_target_mut(&mut self) -> &mut PresentationTarget {
        &mut self.target
    }

    fn set_anti_alias(&mut self, _enabled: bool) {}

    fn set_blend_mode(&mut self, _mode: BlendMode) {}
}

/// Provider with scripted probe/construction results and call counters.
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    probe_result: bool,
    accelerated_ok: bool,
    software_fails: bool,
    probes: Cell<usize>,
    accelerated_attempts: Cell<usize>,
    software_attempts: Cell<usize>,
}

impl MockProvider {
    pub fn new(probe_result: bool, accelerated_ok: bool) -> Self {
        Self {
            probe_result,
            accelerated_ok,
            ..Self::default()
        }
    }

    pub fn failing_software(mut self) -> Self {
        self.software_fails = true;
        self
    }

    pub fn probes(&self) -> usize {
        self.probes.get()
    }

    pub fn accelerated_attempts(&self) -> usize {
        self.accelerated_attempts.get()
    }

    pub fn software_attempts(&self) -> usize {
        self.software_attempts.get()
    }
}

impl SurfaceProvider<'static> for MockProvider {
    fn supports_accelerated(&self, _options: &VideoOptions) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.probe_result
    }

    fn create_accelerated(
        &self,
        _options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle>> {
        self.accelerated_attempts.set(self.accelerated_attempts.get() + 1);
        if !self.accelerated_ok {
            bail!("context creation failed");
        }
        let presented = PresentedSize::new(size.width as f64, size.height as f64);
        Ok(Box::new(MockGpuSurface {
            size,
            target: PresentationTarget::new(presented),
        }))
    }

    fn create_software(
        &self,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle>> {
        self.software_attempts.set(self.software_attempts.get() + 1);
        if self.software_fails {
            bail!("out of memory");
        }
        Ok(Box::new(SoftwareSurface::new(size, options.transparent)?))
    }
}
