//! Flow solver module
//!
//! This module refines a per-pixel velocity field from a gradient bundle
//! using the reduced Horn–Schunck fixed-point iteration.

mod horn_schunck;

pub use horn_schunck::{FlowField, brightness_residual, solve};
