//! Frame file I/O for the binary driver.
//!
//! The core pipeline never touches the filesystem; these helpers sit at the
//! crate edge and translate image decode/encode failures into the crate
//! error taxonomy.

use std::path::Path;

use tracing::debug;

use crate::optical_flow::common::error::{FlowError, Result};
use crate::optical_flow::frame::types::{Frame, RgbImage};

/// Load an image file and convert it to a single-channel floating-point
/// frame.
pub fn load_gray_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let gray = image::load_from_memory(&bytes)
        .map_err(|e| FlowError::DecodeError(format!("{}: {}", path.display(), e)))?
        .to_luma8();
    let (width, height) = gray.dimensions();
    debug!(path = %path.display(), width, height, "Loaded frame");
    Frame::from_luma8(width as usize, height as usize, gray.as_raw())
}

/// Write a render output to disk; the format is inferred from the file
/// extension.
pub fn save_rgb_image<P: AsRef<Path>>(path: P, output: &RgbImage) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = (output.width() as u32, output.height() as u32);
    let buffer = image::RgbImage::from_raw(width, height, output.as_slice().to_vec())
        .ok_or_else(|| {
            FlowError::EncodeError(format!(
                "render output buffer does not match {width}x{height}"
            ))
        })?;
    buffer
        .save(path)
        .map_err(|e| FlowError::EncodeError(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "Wrote flow visualization");
    Ok(())
}
