use tracing::{info, instrument};

use crate::optical_flow::common::error::{FlowError, Result};
use crate::optical_flow::frame::types::{Frame, RgbImage};
use crate::optical_flow::gradient::{GradientExtractor, SobelGradientExtractor};
use crate::optical_flow::render::{FlowConfig, FlowRenderer, HsvFlowRenderer};
use crate::optical_flow::solver::{self, FlowField};

/// One-shot optical flow computation over a frame pair.
///
/// The pipeline owns its configuration and two injected collaborators: a
/// gradient extractor and a renderer. The solver stage is fixed. Each call to
/// [`compute`](Self::compute) is synchronous, deterministic, and independent
/// of previous calls; the caller drives the per-frame cadence.
pub struct FlowPipeline<G: GradientExtractor, R: FlowRenderer> {
    extractor: G,
    renderer: R,
    config: FlowConfig,
}

impl FlowPipeline<SobelGradientExtractor, HsvFlowRenderer> {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            extractor: SobelGradientExtractor,
            renderer: HsvFlowRenderer,
            config,
        }
    }
}

impl<G: GradientExtractor, R: FlowRenderer> FlowPipeline<G, R> {
    pub fn with_custom(extractor: G, renderer: R, config: FlowConfig) -> Self {
        Self {
            extractor,
            renderer,
            config,
        }
    }

    fn validate_parameters(&self) -> Result<()> {
        if !(self.config.alpha > 0.0) || !self.config.alpha.is_finite() {
            return Err(FlowError::InvalidParameter(format!(
                "alpha must be positive and finite, got {}",
                self.config.alpha
            )));
        }
        if self.config.blur_kernel_size == 0 || self.config.blur_kernel_size % 2 == 0 {
            return Err(FlowError::InvalidParameter(format!(
                "blur kernel size must be odd and non-zero, got {}",
                self.config.blur_kernel_size
            )));
        }
        Ok(())
    }

    fn validate_dimensions(&self, frame_prev: &Frame, frame_curr: &Frame) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if frame_prev.is_empty() || frame_curr.is_empty() {
            return Err(FlowError::EmptyFrame);
        }
        if !frame_prev.same_size(frame_curr) {
            return Err(FlowError::dimension_mismatch(
                (frame_prev.width(), frame_prev.height()),
                (frame_curr.width(), frame_curr.height()),
            ));
        }

        Ok(())
    }

    /// Estimate flow for one frame pair and render it per the configured
    /// mode.
    #[instrument(skip(self, frame_prev, frame_curr))]
    pub fn compute(&self, frame_prev: &Frame, frame_curr: &Frame) -> Result<RgbImage> {
        self.compute_with_flow(frame_prev, frame_curr)
            .map(|(output, _)| output)
    }

    /// Like [`compute`](Self::compute), but also returns the final velocity
    /// field.
    #[instrument(skip(self, frame_prev, frame_curr))]
    pub fn compute_with_flow(
        &self,
        frame_prev: &Frame,
        frame_curr: &Frame,
    ) -> Result<(RgbImage, FlowField)> {
        self.validate_parameters()?;

        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = frame_prev.width(),
                height = frame_prev.height()
            )
            .entered();
            self.validate_dimensions(frame_prev, frame_curr)?;
        }

        let bundle = {
            let _span = tracing::info_span!("compute_gradients").entered();
            self.extractor
                .compute_gradients(frame_prev, frame_curr, &self.config)?
        };

        let flow = {
            let _span = tracing::info_span!(
                "solve_flow",
                max_iter = self.config.max_iter,
                alpha = self.config.alpha
            )
            .entered();
            solver::solve(&bundle, self.config.max_iter, self.config.alpha)?
        };

        let output = {
            let _span = tracing::info_span!("render_flow", mode = ?self.config.mode).entered();
            self.renderer.render(&bundle, &flow, &self.config)?
        };

        info!(
            width = frame_prev.width(),
            height = frame_prev.height(),
            "Flow computation complete"
        );
        Ok((output, flow))
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FlowConfig) {
        self.config = config;
    }
}
