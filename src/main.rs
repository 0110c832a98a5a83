use anyhow::{Context, Result, bail};

use hornflow::logger;
use hornflow::optical_flow::{
    FlowConfig, FlowPipeline, RenderMode, load_gray_frame, save_rgb_image,
};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!(
            "Usage: hornflow <frame_prev> <frame_curr> <output> [--sparse] [--iters N] [--alpha A] [--timings]"
        );
    }

    let mut mode = RenderMode::Dense;
    let mut max_iter = 1u32;
    let mut alpha = 10.0f32;
    let mut stage_timings = false;
    let mut rest = args[3..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--sparse" => mode = RenderMode::Sparse,
            "--timings" => stage_timings = true,
            "--iters" => {
                max_iter = rest
                    .next()
                    .context("--iters requires a value")?
                    .parse()
                    .context("--iters value must be a non-negative integer")?;
            }
            "--alpha" => {
                alpha = rest
                    .next()
                    .context("--alpha requires a value")?
                    .parse()
                    .context("--alpha value must be a number")?;
            }
            other => bail!("Unknown argument: {other}"),
        }
    }

    logger::init_with_stage_timings(stage_timings);

    let prev = load_gray_frame(&args[0]).context("failed to load reference frame")?;
    let curr = load_gray_frame(&args[1]).context("failed to load current frame")?;

    let config = FlowConfig::builder()
        .max_iter(max_iter)
        .alpha(alpha)
        .mode(mode)
        .build();
    let pipeline = FlowPipeline::new(config);

    tracing::info!(
        iterations = max_iter,
        alpha,
        mode = ?mode,
        "Flow pipeline initialized"
    );

    let output = pipeline
        .compute(&prev, &curr)
        .context("flow computation failed")?;

    save_rgb_image(&args[2], &output)
        .with_context(|| format!("failed to save {}", args[2]))?;

    Ok(())
}
