//! HSV flow renderer.
//!
//! Dense mode encodes the velocity field as a full-frame color map: hue is
//! the motion direction, saturation is full, and value is the min–max
//! normalized magnitude. Sparse mode copies the grayscale reference frame and
//! draws an anti-aliased arrow at every pixel whose raw flow magnitude
//! exceeds the configured threshold, colored with that pixel's dense-map
//! color so the two modes agree pixel for pixel.

use std::f32::consts::FRAC_PI_4;

use tracing::debug;

use crate::optical_flow::common::error::{FlowError, Result};
use crate::optical_flow::frame::types::RgbImage;
use crate::optical_flow::gradient::types::GradientBundle;
use crate::optical_flow::render::renderer::FlowRenderer;
use crate::optical_flow::render::types::{FlowConfig, RenderMode};
use crate::optical_flow::solver::FlowField;

/// Hue span of the 8-bit encoding: 360 degrees fold into [0, 180] so the
/// channel fits a byte, matching the common video-library convention.
const HUE_SCALE: f32 = 0.5;

pub struct HsvFlowRenderer;

impl FlowRenderer for HsvFlowRenderer {
    fn render(
        &self,
        bundle: &GradientBundle,
        flow: &FlowField,
        config: &FlowConfig,
    ) -> Result<RgbImage> {
        let width = bundle.width();
        let height = bundle.height();
        if flow.width() != width || flow.height() != height {
            return Err(FlowError::dimension_mismatch(
                (width, height),
                (flow.width(), flow.height()),
            ));
        }

        let u = flow.u.as_slice();
        let v = flow.v.as_slice();
        let n = u.len();

        let mut magnitude = vec![0.0f32; n];
        let mut angle = vec![0.0f32; n];
        for i in 0..n {
            magnitude[i] = u[i].hypot(v[i]);
            angle[i] = direction_degrees(u[i], v[i]);
        }

        let normalized = normalize_min_max(&magnitude);
        let color_map = build_color_map(width, height, &angle, &normalized);

        match config.mode {
            RenderMode::Dense => Ok(color_map),
            RenderMode::Sparse => {
                let mut canvas = RgbImage::from_gray(&bundle.reference);
                let mut drawn = 0usize;
                for y in 0..height {
                    for x in 0..width {
                        let i = y * width + x;
                        // Exactly at the threshold draws nothing.
                        if magnitude[i] <= config.arrow_threshold {
                            continue;
                        }
                        let start = (x as f32, y as f32);
                        let end = (
                            x as f32 + config.arrow_scale * u[i],
                            y as f32 + config.arrow_scale * v[i],
                        );
                        draw_arrow(
                            &mut canvas,
                            start,
                            end,
                            color_map.get_pixel(x, y),
                            config.arrow_thickness,
                            config.arrow_tip_length,
                        );
                        drawn += 1;
                    }
                }
                debug!(arrows = drawn, "Rendered sparse flow overlay");
                Ok(canvas)
            }
        }
    }
}

/// Direction of (u, v) in degrees [0, 360), measured with y pointing down.
fn direction_degrees(u: f32, v: f32) -> f32 {
    let deg = v.atan2(u).to_degrees();
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    if deg >= 360.0 { 0.0 } else { deg }
}

/// Min–max normalize into [0, 1]. A constant field normalizes to all zeros.
fn normalize_min_max(values: &[f32]) -> Vec<f32> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;
    if !(range > f32::EPSILON) {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v - min) / range).collect()
}

fn build_color_map(
    width: usize,
    height: usize,
    angle: &[f32],
    normalized: &[f32],
) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            img.put_pixel(x, y, flow_color(angle[i], normalized[i]));
        }
    }
    img
}

/// Color of one flow sample: hue from the direction (quantized into the
/// 8-bit [0, 180] range), full saturation, value from normalized magnitude.
fn flow_color(angle_deg: f32, normalized_magnitude: f32) -> [u8; 3] {
    let hue8 = (angle_deg * HUE_SCALE).round().clamp(0.0, 180.0) as u8;
    let val8 = (normalized_magnitude * 255.0).round().clamp(0.0, 255.0) as u8;
    hsv8_to_rgb(hue8, 255, val8)
}

/// HSV to RGB with hue in [0, 180] (half-degrees), saturation and value in
/// [0, 255].
fn hsv8_to_rgb(hue8: u8, sat8: u8, val8: u8) -> [u8; 3] {
    let h = hue8 as f32 * 2.0;
    let s = sat8 as f32 / 255.0;
    let v = val8 as f32 / 255.0;

    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    ]
}

/// Draw an arrowed line from `start` to `end`: the shaft plus two tip barbs
/// angled pi/4 off the shaft, each `tip_length` of the shaft length.
fn draw_arrow(
    canvas: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    color: [u8; 3],
    thickness: u32,
    tip_length: f32,
) {
    draw_line_aa(canvas, start, end, color, thickness);

    let back_x = start.0 - end.0;
    let back_y = start.1 - end.1;
    let shaft = back_x.hypot(back_y);
    if shaft == 0.0 {
        return;
    }
    let tip = tip_length * shaft;
    let back_angle = back_y.atan2(back_x);
    for da in [FRAC_PI_4, -FRAC_PI_4] {
        let barb = (
            end.0 + tip * (back_angle + da).cos(),
            end.1 + tip * (back_angle + da).sin(),
        );
        draw_line_aa(canvas, barb, end, color, thickness);
    }
}

/// Anti-aliased line via Xiaolin Wu's algorithm, blending coverage into the
/// canvas. Thickness above one draws parallel strokes offset perpendicular
/// to the line direction.
fn draw_line_aa(
    canvas: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    color: [u8; 3],
    thickness: u32,
) {
    let dir_x = end.0 - start.0;
    let dir_y = end.1 - start.1;
    let len = dir_x.hypot(dir_y);
    let (nx, ny) = if len == 0.0 {
        (0.0, 0.0)
    } else {
        (-dir_y / len, dir_x / len)
    };

    let strokes = thickness.max(1);
    for k in 0..strokes {
        let offset = k as f32 - (strokes - 1) as f32 / 2.0;
        wu_line(
            canvas,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
    }
}

fn fpart(v: f32) -> f32 {
    v - v.floor()
}

fn rfpart(v: f32) -> f32 {
    1.0 - fpart(v)
}

fn plot(canvas: &mut RgbImage, steep: bool, x: isize, y: isize, color: [u8; 3], alpha: f32) {
    let (px, py) = if steep { (y, x) } else { (x, y) };
    if px < 0 || py < 0 || alpha <= 0.0 {
        return;
    }
    canvas.blend_pixel(px as usize, py as usize, color, alpha);
}

fn wu_line(canvas: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: [u8; 3]) {
    let (mut x0, mut y0) = start;
    let (mut x1, mut y1) = end;

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

    // First endpoint.
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as isize;
    let ypxl1 = yend.floor() as isize;
    plot(canvas, steep, xpxl1, ypxl1, color, rfpart(yend) * xgap);
    plot(canvas, steep, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    // Second endpoint.
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as isize;
    let ypxl2 = yend.floor() as isize;
    plot(canvas, steep, xpxl2, ypxl2, color, rfpart(yend) * xgap);
    plot(canvas, steep, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);

    // Interior.
    let mut x = xpxl1 + 1;
    while x < xpxl2 {
        let y = intery.floor() as isize;
        plot(canvas, steep, x, y, color, rfpart(intery));
        plot(canvas, steep, x, y + 1, color, fpart(intery));
        intery += gradient;
        x += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optical_flow::frame::types::Frame;
    use crate::optical_flow::gradient::{GradientExtractor, SobelGradientExtractor};
    use crate::optical_flow::render::types::{FlowConfig, RenderMode};

    fn black_bundle(w: usize, h: usize) -> GradientBundle {
        let frame = Frame::new(w, h);
        SobelGradientExtractor
            .compute_gradients(&frame, &frame, &FlowConfig::default())
            .unwrap()
    }

    fn sparse_config() -> FlowConfig {
        FlowConfig::builder().mode(RenderMode::Sparse).build()
    }

    #[test]
    fn test_zero_flow_renders_black_dense_map() {
        let bundle = black_bundle(8, 8);
        let flow = FlowField::new(8, 8);
        let img = HsvFlowRenderer
            .render(&bundle, &flow, &FlowConfig::default())
            .unwrap();
        assert!(img.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_constant_magnitude_normalizes_to_zero_value() {
        // Uniform motion everywhere: the min-max range degenerates, so the
        // value channel collapses to zero and the map stays black.
        let bundle = black_bundle(6, 6);
        let mut flow = FlowField::new(6, 6);
        for v in flow.u.as_mut_slice() {
            *v = 2.0;
        }
        let img = HsvFlowRenderer
            .render(&bundle, &flow, &FlowConfig::default())
            .unwrap();
        assert!(img.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flow_size_mismatch_is_rejected() {
        let bundle = black_bundle(8, 8);
        let flow = FlowField::new(9, 8);
        let result = HsvFlowRenderer.render(&bundle, &flow, &FlowConfig::default());
        assert!(matches!(result, Err(FlowError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_magnitude_at_threshold_draws_nothing() {
        let bundle = black_bundle(16, 16);
        let mut flow = FlowField::new(16, 16);
        flow.u.set(8, 8, 0.5);
        let img = HsvFlowRenderer
            .render(&bundle, &flow, &sparse_config())
            .unwrap();
        let untouched = RgbImage::from_gray(&bundle.reference);
        assert_eq!(img, untouched);
    }

    #[test]
    fn test_magnitude_above_threshold_draws_an_arrow() {
        let bundle = black_bundle(16, 16);
        let mut flow = FlowField::new(16, 16);
        flow.u.set(8, 8, 0.6);
        let img = HsvFlowRenderer
            .render(&bundle, &flow, &sparse_config())
            .unwrap();
        let untouched = RgbImage::from_gray(&bundle.reference);
        assert_ne!(img, untouched);
    }

    #[test]
    fn test_arrow_color_matches_dense_map() {
        // One pixel moves three pixels right. The shaft interior at (6, 5)
        // is plotted at full coverage, so it must carry exactly the dense
        // map color of the source pixel (5, 5).
        let bundle = black_bundle(16, 16);
        let mut flow = FlowField::new(16, 16);
        flow.u.set(5, 5, 3.0);

        let dense = HsvFlowRenderer
            .render(&bundle, &flow, &FlowConfig::default())
            .unwrap();
        let sparse = HsvFlowRenderer
            .render(&bundle, &flow, &sparse_config())
            .unwrap();

        assert_eq!(sparse.get_pixel(6, 5), dense.get_pixel(5, 5));
    }

    #[test]
    fn test_rightward_motion_is_red() {
        // Direction 0 degrees maps to hue 0 with full saturation.
        assert_eq!(flow_color(0.0, 1.0), [255, 0, 0]);
    }

    #[test]
    fn test_direction_degrees_covers_all_quadrants() {
        assert!((direction_degrees(1.0, 0.0) - 0.0).abs() < 1e-4);
        assert!((direction_degrees(0.0, 1.0) - 90.0).abs() < 1e-4);
        assert!((direction_degrees(-1.0, 0.0) - 180.0).abs() < 1e-4);
        assert!((direction_degrees(0.0, -1.0) - 270.0).abs() < 1e-4);
        let d = direction_degrees(0.0, 0.0);
        assert!((0.0..360.0).contains(&d));
    }

    #[test]
    fn test_normalize_min_max_spans_unit_interval() {
        let normalized = normalize_min_max(&[2.0, 4.0, 6.0]);
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_wu_line_stays_in_bounds() {
        // Arrows pointing off the canvas must clip, not panic.
        let bundle = black_bundle(8, 8);
        let mut flow = FlowField::new(8, 8);
        flow.u.set(7, 7, 10.0);
        flow.v.set(7, 7, 10.0);
        flow.u.set(0, 0, -10.0);
        let result = HsvFlowRenderer.render(&bundle, &flow, &sparse_config());
        assert!(result.is_ok());
    }
}
