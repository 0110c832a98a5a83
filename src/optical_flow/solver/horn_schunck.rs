//! Reduced Horn–Schunck iteration.
//!
//! Each pass applies an independent per-pixel fixed-point step that drives
//! the brightness-constancy residual `Ix*u + Iy*v + It` toward zero. The
//! update deliberately uses the pixel's own current estimate rather than a
//! neighborhood average, so there is no inter-pixel coupling; regularization
//! comes solely from the `alpha^2` term in the denominator. Passes are
//! embarrassingly parallel per pixel and run on the rayon pool, with each
//! pass completing before the next one starts.

use rayon::prelude::*;
use tracing::debug;

use crate::optical_flow::common::error::{FlowError, Result};
use crate::optical_flow::frame::types::Frame;
use crate::optical_flow::gradient::types::GradientBundle;

/// Horizontal and vertical velocity grids for one frame pair.
///
/// Zero-initialized, mutated in place across solver passes, and owned by a
/// single solver invocation.
#[derive(Debug, Clone)]
pub struct FlowField {
    pub u: Frame,
    pub v: Frame,
}

impl FlowField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            u: Frame::new(width, height),
            v: Frame::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.u.width()
    }

    pub fn height(&self) -> usize {
        self.u.height()
    }
}

/// Run `max_iter` refinement passes over the bundle and return the final
/// velocity field. `max_iter == 0` returns the all-zero field.
pub fn solve(bundle: &GradientBundle, max_iter: u32, alpha: f32) -> Result<FlowField> {
    if !(alpha > 0.0) || !alpha.is_finite() {
        return Err(FlowError::InvalidParameter(format!(
            "alpha must be positive and finite, got {alpha}"
        )));
    }

    let width = bundle.width();
    let height = bundle.height();
    let mut flow = FlowField::new(width, height);

    let ix = bundle.ix.as_slice();
    let iy = bundle.iy.as_slice();
    let it = bundle.it.as_slice();

    // alpha^2 > 0 keeps the denominator positive everywhere, so the step is
    // bounded even where both spatial gradients vanish.
    let denom: Vec<f32> = ix
        .iter()
        .zip(iy)
        .map(|(&gx, &gy)| gx * gx + gy * gy + alpha * alpha)
        .collect();

    debug!(width, height, max_iter, alpha, "Solving flow field");

    for _ in 0..max_iter {
        flow.u
            .as_mut_slice()
            .par_iter_mut()
            .zip_eq(flow.v.as_mut_slice().par_iter_mut())
            .enumerate()
            .for_each(|(i, (u, v))| {
                let error = ix[i] * *u + iy[i] * *v + it[i];
                *u -= ix[i] * error / denom[i];
                *v -= iy[i] * error / denom[i];
            });
    }

    Ok(flow)
}

/// Mean absolute brightness-constancy residual of a flow field against its
/// gradient bundle. Used to monitor convergence.
pub fn brightness_residual(bundle: &GradientBundle, flow: &FlowField) -> f32 {
    let ix = bundle.ix.as_slice();
    let iy = bundle.iy.as_slice();
    let it = bundle.it.as_slice();
    let u = flow.u.as_slice();
    let v = flow.v.as_slice();

    let n = ix.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = (0..n)
        .map(|i| (ix[i] * u[i] + iy[i] * v[i] + it[i]).abs())
        .sum();
    sum / n as f32
}
