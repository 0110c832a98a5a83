//! Flow rendering module
//!
//! This module turns a solved velocity field into a displayable image,
//! either as a dense HSV-encoded color map or as a sparse arrow overlay.

mod renderer;
mod hsv_renderer;
pub mod types;

pub use renderer::FlowRenderer;
pub use hsv_renderer::HsvFlowRenderer;
pub use types::{FlowConfig, FlowConfigBuilder, RenderMode};
