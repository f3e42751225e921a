use anyhow::Result;
use easel_video::backend::SurfaceHandle as _;
use easel_video::logging::{init_logging, LoggingConfig};
use easel_video::options::AutoScale;
use easel_video::policy::ScalePolicy;
use easel_video::window::{Runtime, RuntimeConfig, VideoApp};
use easel_video::{Notification, Video, VideoOptions};

/// Logs every scale change the video core publishes.
struct ScaleReporter {
    repaints: u64,
}

impl VideoApp for ScaleReporter {
    fn on_notification(&mut self, video: &Video<'_>, notification: Notification) {
        match notification {
            Notification::VideoInit => {
                let design = video.design();
                log::info!(
                    "ready: {}x{} design on the {} backend",
                    design.width(),
                    design.height(),
                    video.renderer_kind()
                );
            }
            Notification::Repaint => {
                self.repaints += 1;
                let scale = video.current_scale();
                let presented = video.presented_size();
                let surface = video.surface().size();
                log::info!(
                    "repaint #{}: scale {:.3}x{:.3}, surface {}x{}, presented {:.0}x{:.0}",
                    self.repaints,
                    scale.x,
                    scale.y,
                    surface.width,
                    surface.height,
                    presented.width,
                    presented.height
                );
            }
            Notification::BoundsChanged => {}
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Usage: easel-demo [options.json]
    let options = match std::env::args().nth(1) {
        Some(path) => VideoOptions::from_json_file(path)?,
        None => {
            let mut options = VideoOptions::new(640, 480);
            options.auto_scale = AutoScale::Flag(true);
            options.scale_method = ScalePolicy::Fit;
            options
        }
    };

    let mut config = RuntimeConfig::new(options);
    config.title = "easel demo".to_string();

    Runtime::run(config, ScaleReporter { repaints: 0 })
}
