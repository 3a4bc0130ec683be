use crate::core::catalog::ClassCatalog;
use crate::core::project::ProjectBoard;
use crate::core::roster::{self, RosterFormat};
use crate::core::{ConfigProvider, Group, GroupingResult, Member, Pipeline, Storage};
use crate::domain::model::{GroupingReport, ProjectReport, RosterSource};
use crate::utils::error::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub const JSON_FILENAME: &str = "groups.json";
pub const CSV_FILENAME: &str = "groups.csv";
pub const ARCHIVE_FILENAME: &str = "groups.zip";

/// Loads a roster, runs every configured project through a [`ProjectBoard`]
/// and writes the resulting groups.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed() {
            Some(seed) => {
                tracing::debug!("Using fixed shuffle seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        }
    }

    fn outputs<'a>(&self, result: &'a GroupingResult) -> Vec<(&'static str, &'a str)> {
        let mut files = Vec::new();
        for format in self.config.output_formats() {
            let file = match format.as_str() {
                "json" => (JSON_FILENAME, result.json_output.as_str()),
                "csv" => (CSV_FILENAME, result.csv_output.as_str()),
                other => {
                    tracing::warn!("Skipping unsupported output format: {}", other);
                    continue;
                }
            };
            // 同一格式只寫一次
            if !files.iter().any(|(name, _)| *name == file.0) {
                files.push(file);
            }
        }
        files
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Member>> {
        match self.config.roster_source() {
            RosterSource::File(path) => {
                tracing::info!("📋 Reading roster from: {}", path);
                let format = RosterFormat::from_path(&path)?;
                let data = tokio::fs::read(&path).await?;
                roster::parse_roster(&data, format)
            }
            RosterSource::Catalog { class_id, seed } => {
                tracing::info!("📋 Using catalog class: {}", class_id);
                let catalog = ClassCatalog::mock(&mut StdRng::seed_from_u64(seed));
                let class = catalog.require(&class_id)?;
                tracing::debug!(
                    "{} ({}, {}) has {} students",
                    class.name,
                    class.grade,
                    class.major,
                    class.students.len()
                );
                Ok(class.students.clone())
            }
        }
    }

    async fn transform(&self, roster: Vec<Member>) -> Result<GroupingResult> {
        let mut rng = self.rng();
        let policy = self.config.remainder_policy();
        let mut board = ProjectBoard::new();

        for spec in self.config.projects() {
            let project_id = board.create_project(&spec.title, spec.group_size)?.id.clone();
            board.generate_groups(&project_id, &roster, policy, &mut rng)?;
        }

        let class_id = match self.config.roster_source() {
            RosterSource::Catalog { class_id, .. } => Some(class_id),
            RosterSource::File(_) => None,
        };

        let report = GroupingReport {
            class_id,
            roster_size: roster.len(),
            generated_at: Utc::now(),
            projects: board
                .projects()
                .iter()
                .map(|project| ProjectReport {
                    summaries: project.groups.iter().map(Group::summary).collect(),
                    project: project.clone(),
                })
                .collect(),
        };

        let json_output = roster::render_json(&report)?;
        let csv_output = roster::render_csv(&report)?;

        Ok(GroupingResult {
            report,
            json_output,
            csv_output,
        })
    }

    async fn load(&self, result: GroupingResult) -> Result<String> {
        let base = Path::new(self.config.output_path());
        let files = self.outputs(&result);

        if self.config.archive() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, content) in &files {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ARCHIVE_FILENAME, &zip_data).await?;
            return Ok(base.join(ARCHIVE_FILENAME).display().to_string());
        }

        let mut written = Vec::new();
        for (name, content) in &files {
            self.storage.write_file(name, content.as_bytes()).await?;
            written.push(base.join(name).display().to_string());
        }

        Ok(written.join(", "))
    }
}
