//! Horn–Schunck optical flow estimation and visualization.
//!
//! The crate exposes a staged pipeline: gradient extraction from a frame
//! pair, an iterative per-pixel flow solver, and a renderer that encodes the
//! velocity field as a dense HSV color map or a sparse arrow overlay.

pub mod logger;
pub mod optical_flow;
