//! Optical flow pipeline module
//!
//! This module provides a structured approach to Horn–Schunck optical flow
//! estimation, with separate modules for gradient extraction, flow solving,
//! rendering, and pipeline orchestration.

pub mod common;
pub mod frame;
pub mod gradient;
pub mod solver;
pub mod render;
pub mod pipeline;


pub use common::{
    FlowError,
    Result,
};

pub use frame::{
    Frame,
    RgbImage,
    load_gray_frame,
    save_rgb_image,
};

pub use gradient::{
    GradientBundle,
    GradientExtractor,
    SobelGradientExtractor,
};

pub use solver::{
    FlowField,
    brightness_residual,
    solve,
};

pub use render::{
    FlowConfig,
    FlowConfigBuilder,
    FlowRenderer,
    HsvFlowRenderer,
    RenderMode,
};

pub use pipeline::{
    FlowPipeline,
};
