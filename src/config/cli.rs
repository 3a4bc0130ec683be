use crate::config::{DEFAULT_CATALOG_SEED, SUPPORTED_OUTPUT_FORMATS};
use crate::core::project::DEFAULT_GROUP_SIZE;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{ProjectSpec, RemainderPolicy, RosterSource};
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_group_size, validate_non_empty_string, validate_output_formats,
    validate_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "group-forge")]
#[command(about = "Split a class roster into random project groups")]
pub struct CliConfig {
    /// Class id from the built-in catalog (e.g. CI1-GI)
    #[arg(long, conflicts_with = "roster")]
    pub class: Option<String>,

    /// Roster file (.csv or .json)
    #[arg(long)]
    pub roster: Option<String>,

    /// Seed for the generated catalog skill scores
    #[arg(long, default_value_t = DEFAULT_CATALOG_SEED)]
    pub catalog_seed: u64,

    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    pub group_size: usize,

    /// Project title; repeat the flag for several projects
    #[arg(long = "project")]
    pub projects: Vec<String>,

    #[arg(long, value_enum, default_value_t = RemainderPolicy::Drop)]
    pub remainder_policy: RemainderPolicy,

    /// Fixed shuffle seed for reproducible groups
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub formats: Vec<String>,

    /// Bundle the outputs into groups.zip
    #[arg(long)]
    pub archive: bool,

    /// Print the catalog classes and exit
    #[arg(long)]
    pub list_classes: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn roster_source(&self) -> RosterSource {
        match &self.roster {
            Some(path) => RosterSource::File(path.clone()),
            None => RosterSource::Catalog {
                class_id: self.class.clone().unwrap_or_default(),
                seed: self.catalog_seed,
            },
        }
    }

    fn projects(&self) -> Vec<ProjectSpec> {
        if self.projects.is_empty() {
            return vec![ProjectSpec {
                title: "Project".to_string(),
                group_size: self.group_size,
            }];
        }
        self.projects
            .iter()
            .map(|title| ProjectSpec {
                title: title.clone(),
                group_size: self.group_size,
            })
            .collect()
    }

    fn remainder_policy(&self) -> RemainderPolicy {
        self.remainder_policy
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive(&self) -> bool {
        self.archive
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_group_size(self.group_size)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("formats", &self.formats, &SUPPORTED_OUTPUT_FORMATS)?;
        for title in &self.projects {
            validate_non_empty_string("project", title)?;
        }

        match (&self.roster, &self.class) {
            (Some(path), _) => {
                validate_path("roster", path)?;
                validate_file_extension("roster", path, &["csv", "json"])?;
            }
            (None, Some(class_id)) => validate_non_empty_string("class", class_id)?,
            (None, None) if !self.list_classes => {
                return Err(GroupError::MissingConfigError {
                    field: "--class or --roster".to_string(),
                })
            }
            (None, None) => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
