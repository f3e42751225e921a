use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::backend::WindowSurfaceProvider;
use crate::host::DeferQueue;
use crate::options::VideoOptions;
use crate::video::{Notification, Video};

use super::WindowHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub video: VideoOptions,
}

impl RuntimeConfig {
    /// Window sized to the design resolution.
    pub fn new(video: VideoOptions) -> Self {
        Self {
            title: "easel".to_string(),
            initial_size: LogicalSize::new(video.width as f64, video.height as f64),
            video,
        }
    }
}

/// Hooks for code that sits on top of the video subsystem.
pub trait VideoApp {
    /// Called for every notification drained from the video core.
    fn on_notification(&mut self, video: &Video<'_>, notification: Notification) {
        let _ = (video, notification);
    }

    /// Called when the window asks for a redraw.
    fn on_redraw(&mut self, video: &Video<'_>) {
        let _ = video;
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: VideoApp + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    video: Video<'this>,
}

struct Slot {
    entry: WindowEntry,
    queue: DeferQueue,
}

impl Slot {
    fn id(&self) -> WindowId {
        self.entry.with_window(|w| w.id())
    }

    /// Runs `f` with the video and a host view over the window and queue.
    fn with_video<R>(&mut self, f: impl FnOnce(&mut Video<'_>, &mut WindowHost<'_>) -> R) -> R {
        let queue = &mut self.queue;
        self.entry.with_mut(|fields| {
            let mut host = WindowHost::new(fields.window, queue);
            f(fields.video, &mut host)
        })
    }

    /// Delivers every deferred callback whose deadline has passed.
    fn fire_due(&mut self, now: Instant) {
        let due = self.queue.take_due(now);
        if due.is_empty() {
            return;
        }
        self.entry.with_video_mut(|video| {
            for token in due {
                video.on_deferred(token);
            }
        });
    }
}

struct AppState<A>
where
    A: VideoApp + 'static,
{
    config: RuntimeConfig,
    app: A,
    slot: Option<Slot>,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: VideoApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            slot: None,
            failure: None,
        }
    }

    fn create_slot(&self, event_loop: &ActiveEventLoop) -> Result<Slot> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.video.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let options = &self.config.video;
        let mut queue = DeferQueue::new();

        let entry = WindowEntryTryBuilder {
            window,
            video_builder: |w| {
                let provider = WindowSurfaceProvider::new(w);
                let mut host = WindowHost::new(w, &mut queue);
                Video::init(options, &provider, &mut host)
            },
        }
        .try_build()
        .context("video initialization failed")?;

        Ok(Slot { entry, queue })
    }

    /// Hands queued notifications to the app and turns repaints into redraws.
    fn pump_notifications(&mut self) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };

        let app = &mut self.app;
        slot.entry.with_mut(|fields| {
            for n in fields.video.drain_notifications() {
                match n {
                    Notification::Repaint => fields.window.request_redraw(),
                    Notification::VideoInit => log::debug!("video init published"),
                    Notification::BoundsChanged => log::trace!("surface bounds refreshed"),
                }
                app.on_notification(fields.video, n);
            }
        });
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        log::error!("{e:#}");
        self.failure = Some(e);
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: VideoApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.slot.is_some() {
            return;
        }

        match self.create_slot(event_loop) {
            Ok(slot) => {
                self.slot = Some(slot);
                self.pump_notifications();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(slot) = self.slot.as_mut() else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        slot.fire_due(Instant::now());
        let deadline = slot.queue.next_deadline();
        self.pump_notifications();

        // Sleep until the next deferred resize is due, if any.
        event_loop.set_control_flow(match deadline {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        if slot.id() != window_id {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.slot = None;
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(_) => slot.with_video(|video, host| video.on_resize(host)),

            WindowEvent::ScaleFactorChanged { .. } => {
                slot.with_video(|video, host| video.on_pixel_ratio_change(host))
            }

            WindowEvent::Moved(_) => slot.with_video(|video, _| video.on_scroll()),

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                slot.entry.with_video(|video| app.on_redraw(video));
            }

            _ => {}
        }

        self.pump_notifications();
    }
}
