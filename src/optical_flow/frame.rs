//! Frame container module
//!
//! In-memory image containers handed across the pipeline boundary: a
//! single-channel floating-point `Frame` and an interleaved 8-bit `RgbImage`,
//! plus file load/save helpers for the binary driver.

pub mod io;
pub mod types;

pub use io::{load_gray_frame, save_rgb_image};
pub use types::{Frame, RgbImage};
