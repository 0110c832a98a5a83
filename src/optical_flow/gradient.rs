//! Gradient extraction module
//!
//! This module converts a frame pair into the smoothed intensity fields and
//! spatial/temporal derivatives consumed by the flow solver.

mod extractor;
mod sobel_extractor;
pub mod types;

pub use extractor::GradientExtractor;
pub use sobel_extractor::SobelGradientExtractor;
pub use types::GradientBundle;
