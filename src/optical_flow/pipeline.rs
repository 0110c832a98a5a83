//! Pipeline orchestration module
//!
//! This module wires gradient extraction, flow solving, and rendering into a
//! single per-frame-pair computation.

mod flow_pipeline;

pub use flow_pipeline::FlowPipeline;
