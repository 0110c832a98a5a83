use crate::optical_flow::common::error::Result;
use crate::optical_flow::frame::types::RgbImage;
use crate::optical_flow::gradient::types::GradientBundle;
use crate::optical_flow::render::types::FlowConfig;
use crate::optical_flow::solver::FlowField;

pub trait FlowRenderer {
    fn render(
        &self,
        bundle: &GradientBundle,
        flow: &FlowField,
        config: &FlowConfig,
    ) -> Result<RgbImage>;
}
