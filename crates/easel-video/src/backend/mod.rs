//! Rendering backends and backend selection.
//!
//! This module is responsible for:
//! - the `SurfaceHandle` contract every backend surface satisfies
//! - picking a backend (GPU first, software fallback)
//! - the concrete wgpu and CPU framebuffer surfaces

mod blend;
mod gpu;
mod handle;
mod provider;
mod selector;
mod software;
mod surface;

pub use blend::BlendMode;
pub use gpu::GpuSurface;
pub use handle::{PresentationTarget, SurfaceHandle, SurfaceKind};
pub use provider::WindowSurfaceProvider;
pub use selector::{select_backend, SurfaceProvider};
pub use software::SoftwareSurface;
