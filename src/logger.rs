//! Tracing setup for the flow pipeline.
//!
//! The pipeline wraps each stage (`compute_gradients`, `solve_flow`,
//! `render_flow`) in an info span. Span-close events double as per-stage
//! timings, so they are opt-in rather than inferred from the filter string.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, fmt::format::FmtSpan};

/// Filter applied when `RUST_LOG` is unset: crate logs at info, dependencies
/// stay quiet.
const DEFAULT_DIRECTIVE: &str = "hornflow=info";

pub fn init() {
    init_with_stage_timings(false);
}

/// Initialize logging. With `stage_timings` set, a close event is emitted
/// for every pipeline stage span, reporting how long each stage took.
pub fn init_with_stage_timings(stage_timings: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let span_events = if stage_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }
}
