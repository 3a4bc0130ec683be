pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LocalStorage};

pub use app::pipelines::RosterPipeline;
pub use config::toml_config::TomlConfig;
pub use core::{
    catalog::ClassCatalog,
    engine::GroupingEngine,
    partition::{partition, GroupPartitioner, Partition},
    project::ProjectBoard,
};
pub use domain::model::{Group, Member, Project, RemainderPolicy, SkillCategory, SkillScores};
pub use utils::error::{GroupError, Result};
