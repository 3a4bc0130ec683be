use crate::config::{DEFAULT_CATALOG_SEED, SUPPORTED_OUTPUT_FORMATS};
use crate::core::ConfigProvider;
use crate::domain::model::{ProjectSpec, RemainderPolicy, RosterSource};
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub roster: RosterConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub class_id: Option<String>,
    pub file: Option<String>,
    pub catalog_seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub remainder_policy: Option<RemainderPolicy>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub archive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GroupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ROSTER_FILE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.roster.file, &self.roster.class_id) {
            (Some(_), Some(_)) => {
                return Err(GroupError::ConfigValidationError {
                    field: "roster".to_string(),
                    message: "Set either roster.file or roster.class_id, not both".to_string(),
                })
            }
            (Some(file), None) => {
                validation::validate_path("roster.file", file)?;
                validation::validate_file_extension("roster.file", file, &["csv", "json"])?;
            }
            (None, class_id) => {
                let class_id = validation::validate_required_field("roster.class_id", class_id)?;
                validation::validate_non_empty_string("roster.class_id", class_id)?;
            }
        }

        if self.projects.is_empty() {
            return Err(GroupError::MissingConfigError {
                field: "projects".to_string(),
            });
        }
        for project in &self.projects {
            validation::validate_non_empty_string("projects.title", &project.title)?;
            validation::validate_group_size(project.group_size)?;
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats(
            "output.output_formats",
            &self.output.output_formats,
            &SUPPORTED_OUTPUT_FORMATS,
        )?;

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn roster_source(&self) -> RosterSource {
        match &self.roster.file {
            Some(file) => RosterSource::File(file.clone()),
            None => RosterSource::Catalog {
                class_id: self.roster.class_id.clone().unwrap_or_default(),
                seed: self.roster.catalog_seed.unwrap_or(DEFAULT_CATALOG_SEED),
            },
        }
    }

    fn projects(&self) -> Vec<ProjectSpec> {
        self.projects.clone()
    }

    fn remainder_policy(&self) -> RemainderPolicy {
        self.grouping.remainder_policy.unwrap_or_default()
    }

    fn seed(&self) -> Option<u64> {
        self.grouping.seed
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn archive(&self) -> bool {
        self.output.archive.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
