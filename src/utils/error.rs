use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid group size {size}: group size must be a positive integer")]
    InvalidGroupSize { size: usize },

    #[error("Duplicate member id in roster: {id}")]
    DuplicateMember { id: String },

    #[error("Unknown class: {class_id}")]
    UnknownClass { class_id: String },

    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GroupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GroupError::TomlError(_)
            | GroupError::ConfigError { .. }
            | GroupError::ConfigValidationError { .. }
            | GroupError::InvalidConfigValueError { .. }
            | GroupError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GroupError::InvalidGroupSize { .. }
            | GroupError::DuplicateMember { .. }
            | GroupError::UnknownClass { .. }
            | GroupError::ProjectNotFound { .. }
            | GroupError::ValidationError { .. }
            | GroupError::CsvError(_) => ErrorCategory::Input,
            GroupError::ProcessingError { .. } | GroupError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            GroupError::IoError(_) | GroupError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GroupError::InvalidGroupSize { .. } => {
                "Pass a group size of at least 1 (for example --group-size 5)".to_string()
            }
            GroupError::DuplicateMember { id } => {
                format!("Remove or rename the repeated roster entry '{}'", id)
            }
            GroupError::UnknownClass { .. } => {
                "Run with --list-classes to see the available class ids".to_string()
            }
            GroupError::ProjectNotFound { .. } => {
                "Create the project before generating its groups".to_string()
            }
            GroupError::CsvError(_) => {
                "Check that the roster CSV has the header id,name,frontend,backend,uiux,security,devops"
                    .to_string()
            }
            GroupError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            GroupError::TomlError(_) => {
                "Check the TOML syntax of the configuration file".to_string()
            }
            GroupError::ConfigError { .. }
            | GroupError::ConfigValidationError { .. }
            | GroupError::InvalidConfigValueError { .. }
            | GroupError::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
            GroupError::ValidationError { .. } => "Fix the reported input and retry".to_string(),
            GroupError::SerializationError(_)
            | GroupError::ProcessingError { .. }
            | GroupError::ZipError(_) => "Retry with --verbose for more detail".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Processing => format!("Could not build the groups: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度對應的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupError>;
