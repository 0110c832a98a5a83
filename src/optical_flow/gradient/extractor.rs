use crate::optical_flow::common::error::Result;
use crate::optical_flow::frame::types::Frame;
use crate::optical_flow::gradient::types::GradientBundle;
use crate::optical_flow::render::types::FlowConfig;

pub trait GradientExtractor {
    fn compute_gradients(
        &self,
        frame_prev: &Frame,
        frame_curr: &Frame,
        config: &FlowConfig,
    ) -> Result<GradientBundle>;
}
