//! Flow configuration types

/// Output mode for a flow computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Full-frame color map: hue encodes direction, value encodes magnitude.
    Dense,
    /// Reference frame with arrows drawn at pixels above the motion threshold.
    Sparse,
}

/// Configuration for flow estimation and rendering.
///
/// Defaults reproduce the reference constants: one refinement pass with
/// alpha 10, a 3x3 auto-sigma Gaussian blur, and 1 px arrows with a 0.2 tip
/// fraction drawn above magnitude 0.5.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Number of solver refinement passes (0 is allowed).
    pub max_iter: u32,
    /// Smoothness weight; must be positive and finite.
    pub alpha: f32,
    /// Dense color map or sparse arrow overlay.
    pub mode: RenderMode,
    /// Gaussian blur kernel side length, odd.
    pub blur_kernel_size: usize,
    /// Blur standard deviation; 0 derives it from the kernel size.
    pub blur_sigma: f32,
    /// Multiplier applied to (u, v) when placing arrow tips.
    pub arrow_scale: f32,
    /// Arrow stroke width in pixels.
    pub arrow_thickness: u32,
    /// Arrowhead size as a fraction of the shaft length.
    pub arrow_tip_length: f32,
    /// Minimum flow magnitude (exclusive) for a pixel to receive an arrow.
    pub arrow_threshold: f32,
    /// Whether the pipeline validates frame dimensions before each stage.
    pub validate_dimensions: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_iter: 1,
            alpha: 10.0,
            mode: RenderMode::Dense,
            blur_kernel_size: 3,
            blur_sigma: 0.0,
            arrow_scale: 1.0,
            arrow_thickness: 1,
            arrow_tip_length: 0.2,
            arrow_threshold: 0.5,
            validate_dimensions: true,
        }
    }
}

impl FlowConfig {
    pub fn builder() -> FlowConfigBuilder {
        FlowConfigBuilder::default()
    }
}

/// Builder for FlowConfig
#[derive(Default)]
pub struct FlowConfigBuilder {
    max_iter: Option<u32>,
    alpha: Option<f32>,
    mode: Option<RenderMode>,
    blur_kernel_size: Option<usize>,
    blur_sigma: Option<f32>,
    arrow_scale: Option<f32>,
    arrow_thickness: Option<u32>,
    arrow_tip_length: Option<f32>,
    arrow_threshold: Option<f32>,
    validate_dimensions: Option<bool>,
}

impl FlowConfigBuilder {
    pub fn max_iter(mut self, max_iter: u32) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn blur_kernel_size(mut self, size: usize) -> Self {
        self.blur_kernel_size = Some(size);
        self
    }

    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = Some(sigma);
        self
    }

    pub fn arrow_scale(mut self, scale: f32) -> Self {
        self.arrow_scale = Some(scale);
        self
    }

    pub fn arrow_thickness(mut self, thickness: u32) -> Self {
        self.arrow_thickness = Some(thickness);
        self
    }

    pub fn arrow_tip_length(mut self, fraction: f32) -> Self {
        self.arrow_tip_length = Some(fraction);
        self
    }

    pub fn arrow_threshold(mut self, threshold: f32) -> Self {
        self.arrow_threshold = Some(threshold);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> FlowConfig {
        let default = FlowConfig::default();
        FlowConfig {
            max_iter: self.max_iter.unwrap_or(default.max_iter),
            alpha: self.alpha.unwrap_or(default.alpha),
            mode: self.mode.unwrap_or(default.mode),
            blur_kernel_size: self.blur_kernel_size.unwrap_or(default.blur_kernel_size),
            blur_sigma: self.blur_sigma.unwrap_or(default.blur_sigma),
            arrow_scale: self.arrow_scale.unwrap_or(default.arrow_scale),
            arrow_thickness: self.arrow_thickness.unwrap_or(default.arrow_thickness),
            arrow_tip_length: self.arrow_tip_length.unwrap_or(default.arrow_tip_length),
            arrow_threshold: self.arrow_threshold.unwrap_or(default.arrow_threshold),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}
