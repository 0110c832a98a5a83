//! Derivative field types

use crate::optical_flow::frame::types::Frame;

/// Co-registered derivative fields for one frame pair.
///
/// All grids share the dimensions of the input frames. The bundle is created
/// fresh per frame pair and owned by the solver invocation that requested it.
#[derive(Debug, Clone)]
pub struct GradientBundle {
    /// Gaussian-smoothed intensity of the reference frame.
    pub i1_smooth: Frame,
    /// Gaussian-smoothed intensity of the current frame.
    pub i2_smooth: Frame,
    /// Horizontal Sobel derivative of the smoothed reference frame.
    pub ix: Frame,
    /// Vertical Sobel derivative of the smoothed reference frame.
    pub iy: Frame,
    /// Temporal derivative: unsmoothed current minus unsmoothed reference.
    pub it: Frame,
    /// Unsmoothed grayscale reference frame, kept for the sparse overlay.
    pub reference: Frame,
}

impl GradientBundle {
    pub fn width(&self) -> usize {
        self.reference.width()
    }

    pub fn height(&self) -> usize {
        self.reference.height()
    }
}
