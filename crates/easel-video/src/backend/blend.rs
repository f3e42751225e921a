use serde::{Deserialize, Serialize};

/// Compositing mode restored on the surface each time a scale is applied.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    /// Also accepted as `"lighter"`.
    Additive,
    Screen,
}

impl BlendMode {
    /// Parses a mode name. Unknown names fall back to [`BlendMode::Normal`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "multiply" => Self::Multiply,
            "additive" | "lighter" => Self::Additive,
            "screen" => Self::Screen,
            other => {
                log::debug!("unknown blend mode {other:?}, using \"normal\"");
                Self::Normal
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Additive => "additive",
            Self::Screen => "screen",
        }
    }

    /// Pipeline blend state for the GPU backend (premultiplied alpha).
    pub fn blend_state(self) -> wgpu::BlendState {
        use wgpu::{BlendComponent, BlendFactor, BlendOperation};

        let color = match self {
            Self::Normal => return wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            Self::Multiply => BlendComponent {
                src_factor: BlendFactor::Dst,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
                operation: BlendOperation::Add,
            },
            Self::Additive => BlendComponent {
                src_factor: BlendFactor::One,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::Add,
            },
            Self::Screen => BlendComponent {
                src_factor: BlendFactor::One,
                dst_factor: BlendFactor::OneMinusSrc,
                operation: BlendOperation::Add,
            },
        };

        wgpu::BlendState {
            color,
            alpha: BlendComponent::OVER,
        }
    }
}

impl From<String> for BlendMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BlendMode> for &'static str {
    fn from(mode: BlendMode) -> Self {
        mode.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighter_is_additive() {
        assert_eq!(BlendMode::from_name("lighter"), BlendMode::Additive);
    }

    #[test]
    fn unknown_is_normal() {
        assert_eq!(BlendMode::from_name("xor"), BlendMode::Normal);
    }

    #[test]
    fn normal_uses_premultiplied_over() {
        assert_eq!(
            BlendMode::Normal.blend_state(),
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
        );
        assert_ne!(
            BlendMode::Additive.blend_state(),
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
        );
    }
}
