//! Configuration consumed when the video subsystem is initialized.
//!
//! Options deserialize from JSON (or any serde format). Only the design
//! resolution is required; every other field has a default.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::BlendMode;
use crate::policy::ScalePolicy;

/// Which backend the selector should try.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererChoice {
    /// GPU first, software on failure.
    #[default]
    Auto,
    /// GPU requested explicitly; still falls back to software on failure.
    Accelerated,
    /// Software only; the GPU is never probed.
    Software,
}

/// Adapter preference forwarded to the GPU backend.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
}

impl From<PowerPreference> for wgpu::PowerPreference {
    fn from(p: PowerPreference) -> Self {
        match p {
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
        }
    }
}

/// The `"auto"` keyword accepted by `auto_scale` and `scale`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoKeyword {
    Auto,
}

/// `auto_scale`: a boolean, or the `"auto"` keyword (same as `true`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoScale {
    Flag(bool),
    Keyword(AutoKeyword),
}

impl AutoScale {
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Flag(true) | Self::Keyword(AutoKeyword::Auto))
    }
}

impl Default for AutoScale {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// `scale`: a fixed base scale, or `"auto"` which turns auto scaling on.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleOption {
    Factor(f64),
    Keyword(AutoKeyword),
}

impl Default for ScaleOption {
    fn default() -> Self {
        Self::Factor(1.0)
    }
}

/// Recognized initialization options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VideoOptions {
    /// Design width in logical pixels. Must be > 0.
    pub width: u32,
    /// Design height in logical pixels. Must be > 0.
    pub height: u32,

    #[serde(default)]
    pub renderer: RendererChoice,

    #[serde(default)]
    pub auto_scale: AutoScale,

    #[serde(default)]
    pub scale: ScaleOption,

    /// Policy name; unknown names resolve to `fit`.
    #[serde(default)]
    pub scale_method: ScalePolicy,

    #[serde(default)]
    pub anti_alias: bool,

    #[serde(default)]
    pub blend_mode: BlendMode,

    #[serde(default)]
    pub transparent: bool,

    /// Measure the parent container instead of the whole viewport.
    #[serde(default)]
    pub use_container_rect_for_sizing: bool,

    #[serde(default)]
    pub max_width: Option<f64>,

    #[serde(default)]
    pub max_height: Option<f64>,

    /// Reject GPU adapters that are emulated on the CPU.
    #[serde(default)]
    pub fail_if_major_performance_caveat: bool,

    #[serde(default)]
    pub power_preference: PowerPreference,

    /// Delay handed to the host deferral primitive for non-forced resizes.
    #[serde(default = "default_resize_delay_ms")]
    pub resize_delay_ms: u64,
}

fn default_resize_delay_ms() -> u64 {
    10
}

impl VideoOptions {
    /// Options for the given design resolution with every other field defaulted.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            renderer: RendererChoice::default(),
            auto_scale: AutoScale::default(),
            scale: ScaleOption::default(),
            scale_method: ScalePolicy::default(),
            anti_alias: false,
            blend_mode: BlendMode::default(),
            transparent: false,
            use_container_rect_for_sizing: false,
            max_width: None,
            max_height: None,
            fail_if_major_performance_caveat: false,
            power_preference: PowerPreference::default(),
            resize_delay_ms: default_resize_delay_ms(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse video options")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read video options from {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Auto scaling is on if either `auto_scale` or `scale` asks for it.
    pub fn auto_scale_enabled(&self) -> bool {
        self.auto_scale.is_enabled()
            || matches!(self.scale, ScaleOption::Keyword(AutoKeyword::Auto))
    }

    /// Fixed base scale; `"auto"` and unusable factors resolve to 1.
    pub fn base_scale(&self) -> f64 {
        match self.scale {
            ScaleOption::Factor(f) if f > 0.0 && f.is_finite() => f,
            _ => 1.0,
        }
    }

    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_uses_defaults() {
        let o = VideoOptions::from_json_str(r#"{ "width": 640, "height": 480 }"#).unwrap();
        assert_eq!(o, VideoOptions::new(640, 480));
        assert!(!o.auto_scale_enabled());
        assert_eq!(o.base_scale(), 1.0);
        assert_eq!(o.resize_delay(), Duration::from_millis(10));
    }

    #[test]
    fn missing_design_size_is_an_error() {
        assert!(VideoOptions::from_json_str(r#"{ "width": 640 }"#).is_err());
    }

    #[test]
    fn auto_keyword_in_either_field_enables_auto_scale() {
        let o = VideoOptions::from_json_str(r#"{ "width": 1, "height": 1, "auto_scale": "auto" }"#)
            .unwrap();
        assert!(o.auto_scale_enabled());

        let o =
            VideoOptions::from_json_str(r#"{ "width": 1, "height": 1, "scale": "auto" }"#).unwrap();
        assert!(o.auto_scale_enabled());
        assert_eq!(o.base_scale(), 1.0);

        let o = VideoOptions::from_json_str(r#"{ "width": 1, "height": 1, "auto_scale": true }"#)
            .unwrap();
        assert!(o.auto_scale_enabled());
    }

    #[test]
    fn full_options_parse() {
        let json = r#"{
            "width": 800,
            "height": 600,
            "renderer": "software",
            "scale": 2.0,
            "scale_method": "fill-max",
            "anti_alias": true,
            "blend_mode": "multiply",
            "transparent": true,
            "use_container_rect_for_sizing": true,
            "max_width": 1024,
            "max_height": 768.5,
            "power_preference": "low-power",
            "resize_delay_ms": 50
        }"#;
        let o = VideoOptions::from_json_str(json).unwrap();
        assert_eq!(o.renderer, RendererChoice::Software);
        assert_eq!(o.base_scale(), 2.0);
        assert_eq!(o.scale_method, ScalePolicy::FillMax);
        assert_eq!(o.blend_mode, BlendMode::Multiply);
        assert_eq!(o.max_width, Some(1024.0));
        assert_eq!(o.max_height, Some(768.5));
        assert_eq!(o.power_preference, PowerPreference::LowPower);
        assert_eq!(o.resize_delay(), Duration::from_millis(50));
    }

    #[test]
    fn unknown_scale_method_is_fit() {
        let o = VideoOptions::from_json_str(
            r#"{ "width": 1, "height": 1, "scale_method": "zoom-to-fill" }"#,
        )
        .unwrap();
        assert_eq!(o.scale_method, ScalePolicy::Fit);
    }

    #[test]
    fn non_positive_scale_factor_resolves_to_one() {
        let mut o = VideoOptions::new(1, 1);
        o.scale = ScaleOption::Factor(0.0);
        assert_eq!(o.base_scale(), 1.0);
        o.scale = ScaleOption::Factor(-3.0);
        assert_eq!(o.base_scale(), 1.0);
    }
}
