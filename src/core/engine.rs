use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct GroupingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GroupingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting group generation...");

        // Extract
        tracing::info!("📥 Loading roster...");
        let roster = self.pipeline.extract().await?;
        tracing::info!("Loaded {} members", roster.len());

        // Transform
        tracing::info!("🔀 Generating groups...");
        let result = self.pipeline.transform(roster).await?;
        for entry in &result.report.projects {
            tracing::info!(
                "{}: {} groups, {} unassigned",
                entry.project.title,
                entry.project.groups.len(),
                entry.project.unassigned.len()
            );
        }

        // Load
        tracing::info!("💾 Writing results...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
