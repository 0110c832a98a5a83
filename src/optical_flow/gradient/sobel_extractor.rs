//! Gradient extractor built on separable Gaussian and Sobel convolutions.
//!
//! Both frames are smoothed with a small Gaussian before differentiation to
//! suppress derivative noise. Spatial derivatives are taken from the smoothed
//! reference frame only; the temporal derivative is the raw intensity
//! difference of the pair. Border handling is replicate (clamp-to-edge)
//! throughout.

use tracing::debug;

use crate::optical_flow::common::error::{FlowError, Result};
use crate::optical_flow::frame::types::Frame;
use crate::optical_flow::gradient::extractor::GradientExtractor;
use crate::optical_flow::gradient::types::GradientBundle;
use crate::optical_flow::render::types::FlowConfig;

/// Separable Sobel taps, unnormalized (standard convention).
const SOBEL_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];
const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];

/// Fixed small Gaussian taps used when sigma is auto-derived, matching the
/// usual binomial approximations for kernel sizes up to 7.
const GAUSS_TAB_3: [f32; 3] = [0.25, 0.5, 0.25];
const GAUSS_TAB_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const GAUSS_TAB_7: [f32; 7] = [
    0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
];

pub struct SobelGradientExtractor;

impl GradientExtractor for SobelGradientExtractor {
    fn compute_gradients(
        &self,
        frame_prev: &Frame,
        frame_curr: &Frame,
        config: &FlowConfig,
    ) -> Result<GradientBundle> {
        if frame_prev.is_empty() || frame_curr.is_empty() {
            return Err(FlowError::EmptyFrame);
        }
        if !frame_prev.same_size(frame_curr) {
            return Err(FlowError::dimension_mismatch(
                (frame_prev.width(), frame_prev.height()),
                (frame_curr.width(), frame_curr.height()),
            ));
        }

        let kernel = gaussian_kernel(config.blur_kernel_size, config.blur_sigma)?;
        debug!(
            kernel_size = config.blur_kernel_size,
            sigma = config.blur_sigma,
            "Smoothing frame pair"
        );

        let i1_smooth = convolve_separable(frame_prev, &kernel, &kernel);
        let i2_smooth = convolve_separable(frame_curr, &kernel, &kernel);

        // Spatial structure is taken from the reference frame only.
        let ix = convolve_separable(&i1_smooth, &SOBEL_DERIV, &SOBEL_SMOOTH);
        let iy = convolve_separable(&i1_smooth, &SOBEL_SMOOTH, &SOBEL_DERIV);

        // The temporal derivative uses the unsmoothed intensities.
        let mut it = Frame::new(frame_prev.width(), frame_prev.height());
        for (out, (&a, &b)) in it
            .as_mut_slice()
            .iter_mut()
            .zip(frame_curr.as_slice().iter().zip(frame_prev.as_slice()))
        {
            *out = a - b;
        }

        Ok(GradientBundle {
            i1_smooth,
            i2_smooth,
            ix,
            iy,
            it,
            reference: frame_prev.clone(),
        })
    }
}

/// Build a normalized 1D Gaussian kernel.
///
/// A non-positive sigma is auto-derived from the kernel size with the rule
/// `sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8`; sizes 3, 5 and 7 then use
/// the fixed binomial taps instead of evaluating the exponential.
fn gaussian_kernel(size: usize, sigma: f32) -> Result<Vec<f32>> {
    if size == 0 || size % 2 == 0 {
        return Err(FlowError::InvalidParameter(format!(
            "blur kernel size must be odd and non-zero, got {size}"
        )));
    }

    if sigma <= 0.0 {
        match size {
            1 => return Ok(vec![1.0]),
            3 => return Ok(GAUSS_TAB_3.to_vec()),
            5 => return Ok(GAUSS_TAB_5.to_vec()),
            7 => return Ok(GAUSS_TAB_7.to_vec()),
            _ => {}
        }
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };

    let half = (size / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-half..=half)
        .map(|i| (-(i * i) as f32 / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    Ok(taps)
}

/// Convolve each row with `row_kernel`, then each column with `col_kernel`.
/// Kernel windows extending past the image borders sample the nearest edge
/// pixel.
fn convolve_separable(src: &Frame, row_kernel: &[f32], col_kernel: &[f32]) -> Frame {
    let rows = convolve_rows(src, row_kernel);
    convolve_cols(&rows, col_kernel)
}

fn convolve_rows(src: &Frame, kernel: &[f32]) -> Frame {
    let w = src.width();
    let h = src.height();
    let half = (kernel.len() / 2) as isize;
    let mut dst = Frame::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = x as isize + ki as isize - half;
                acc += src.get_clamped(sx, y as isize) * kv;
            }
            dst.set(x, y, acc);
        }
    }
    dst
}

fn convolve_cols(src: &Frame, kernel: &[f32]) -> Frame {
    let w = src.width();
    let h = src.height();
    let half = (kernel.len() / 2) as isize;
    let mut dst = Frame::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = y as isize + ki as isize - half;
                acc += src.get_clamped(x as isize, sy) * kv;
            }
            dst.set(x, y, acc);
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optical_flow::render::types::FlowConfig;

    fn ramp_frame(w: usize, h: usize, offset: f32) -> Frame {
        let mut frame = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                frame.set(x, y, x as f32 + offset);
            }
        }
        frame
    }

    #[test]
    fn test_gaussian_kernel_is_normalized() {
        for size in [1, 3, 5, 7, 9] {
            let taps = gaussian_kernel(size, 0.0).unwrap();
            assert_eq!(taps.len(), size);
            let sum: f32 = taps.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "size {size}: sum {sum}");
        }
    }

    #[test]
    fn test_gaussian_kernel_rejects_even_size() {
        assert!(matches!(
            gaussian_kernel(4, 0.0),
            Err(FlowError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let a = Frame::new(10, 10);
        let b = Frame::new(10, 12);
        let result =
            SobelGradientExtractor.compute_gradients(&a, &b, &FlowConfig::default());
        assert!(matches!(result, Err(FlowError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let a = Frame::new(0, 0);
        let b = Frame::new(0, 0);
        let result =
            SobelGradientExtractor.compute_gradients(&a, &b, &FlowConfig::default());
        assert!(matches!(result, Err(FlowError::EmptyFrame)));
    }

    #[test]
    fn test_constant_pair_has_zero_derivatives() {
        let frame = Frame::from_vec(8, 8, vec![128.0; 64]).unwrap();
        let bundle = SobelGradientExtractor
            .compute_gradients(&frame, &frame, &FlowConfig::default())
            .unwrap();
        for i in 0..64 {
            assert!(bundle.ix.as_slice()[i].abs() < 1e-4);
            assert!(bundle.iy.as_slice()[i].abs() < 1e-4);
            assert!(bundle.it.as_slice()[i].abs() < 1e-4);
        }
    }

    #[test]
    fn test_horizontal_ramp_gradient() {
        // Intensity equals x, so the interior Ix response of the
        // unnormalized Sobel kernel is 2 * (1 + 2 + 1) = 8, and Iy is zero.
        let frame = ramp_frame(16, 16, 0.0);
        let bundle = SobelGradientExtractor
            .compute_gradients(&frame, &frame, &FlowConfig::default())
            .unwrap();
        assert!((bundle.ix.get(8, 8) - 8.0).abs() < 1e-3);
        assert!(bundle.iy.get(8, 8).abs() < 1e-3);
    }

    #[test]
    fn test_temporal_derivative_uses_unsmoothed_difference() {
        let prev = ramp_frame(16, 16, 0.0);
        let curr = ramp_frame(16, 16, -1.0);
        let bundle = SobelGradientExtractor
            .compute_gradients(&prev, &curr, &FlowConfig::default())
            .unwrap();
        for &it in bundle.it.as_slice() {
            assert!((it + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let prev = ramp_frame(12, 9, 0.0);
        let curr = ramp_frame(12, 9, 1.5);
        let config = FlowConfig::default();
        let a = SobelGradientExtractor
            .compute_gradients(&prev, &curr, &config)
            .unwrap();
        let b = SobelGradientExtractor
            .compute_gradients(&prev, &curr, &config)
            .unwrap();
        assert_eq!(a.ix.as_slice(), b.ix.as_slice());
        assert_eq!(a.iy.as_slice(), b.iy.as_slice());
        assert_eq!(a.it.as_slice(), b.it.as_slice());
        assert_eq!(a.i1_smooth.as_slice(), b.i1_smooth.as_slice());
        assert_eq!(a.i2_smooth.as_slice(), b.i2_smooth.as_slice());
    }

    #[test]
    fn test_vertical_edge_produces_positive_ix() {
        // Left half dark, right half bright: Ix should respond strongly at
        // the edge and stay near zero in the flat regions.
        let mut frame = Frame::new(20, 10);
        for y in 0..10 {
            for x in 10..20 {
                frame.set(x, y, 100.0);
            }
        }
        let bundle = SobelGradientExtractor
            .compute_gradients(&frame, &frame, &FlowConfig::default())
            .unwrap();
        assert!(bundle.ix.get(10, 5) > 50.0);
        assert!(bundle.ix.get(3, 5).abs() < 1.0);
    }
}
