//! Surface sizing policy.
//!
//! Pure geometry: maps (design resolution, container size, bounds, policy,
//! pixel ratio) to scale factors and a target surface size. Nothing here
//! touches a backend.

mod compute;

pub use compute::{compute_scale, ScaleOutcome};

use serde::{Deserialize, Serialize};

/// Strategy used to fit the design resolution into the container.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ScalePolicy {
    /// Uniform scale by the tighter axis; surface keeps the design size.
    #[default]
    Fit,
    /// Fill the container, growing the surface along the wider axis.
    FillMin,
    /// Fill the container, shrinking the surface along the narrower axis.
    FillMax,
    /// Surface takes the container size; content scale stays 1.
    Flex,
    /// Surface width follows the container, height stays at design height.
    FlexWidth,
    /// Surface height follows the container, width stays at design width.
    FlexHeight,
    /// Independent per-axis scale; aspect ratio is not preserved.
    Stretch,
}

impl ScalePolicy {
    pub const ALL: [ScalePolicy; 7] = [
        ScalePolicy::Fit,
        ScalePolicy::FillMin,
        ScalePolicy::FillMax,
        ScalePolicy::Flex,
        ScalePolicy::FlexWidth,
        ScalePolicy::FlexHeight,
        ScalePolicy::Stretch,
    ];

    /// Parses a policy name. Unknown names fall back to [`ScalePolicy::Fit`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fit" => Self::Fit,
            "fill-min" => Self::FillMin,
            "fill-max" => Self::FillMax,
            "flex" => Self::Flex,
            "flex-width" => Self::FlexWidth,
            "flex-height" => Self::FlexHeight,
            "stretch" => Self::Stretch,
            other => {
                log::debug!("unknown scale method {other:?}, using \"fit\"");
                Self::Fit
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::FillMin => "fill-min",
            Self::FillMax => "fill-max",
            Self::Flex => "flex",
            Self::FlexWidth => "flex-width",
            Self::FlexHeight => "flex-height",
            Self::Stretch => "stretch",
        }
    }

    /// Whether the policy changes the physical surface size, not just its scale.
    pub fn resizes_surface(self) -> bool {
        !matches!(self, Self::Fit | Self::Stretch)
    }
}

impl From<&str> for ScalePolicy {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for ScalePolicy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ScalePolicy> for &'static str {
    fn from(policy: ScalePolicy) -> Self {
        policy.name()
    }
}

impl std::fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
