use anyhow::{Context, Result};
use reddit_join::{init_tracing_once, RedditPipeline};

fn main() -> Result<()> {
    init_tracing_once();

    // Paths default to the sample data layout; see `PipelineOptions::default`.
    let pipeline = RedditPipeline::new().progress(true);
    let opts = pipeline.options();

    let report = pipeline.run().with_context(|| {
        format!(
            "pipeline over {} + {}",
            opts.comments_path.display(),
            opts.submissions_path.display()
        )
    })?;

    tracing::info!("run report: {}", serde_json::to_string(&report)?);
    Ok(())
}
