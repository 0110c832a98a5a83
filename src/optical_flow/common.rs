//! Common utilities module
//!
//! This module contains shared error types used across the flow pipeline.

pub mod error;

pub use error::{FlowError, Result};
