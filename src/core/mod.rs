pub mod catalog;
pub mod engine;
pub mod partition;
pub mod project;
pub mod roster;

pub use crate::domain::model::{Group, GroupingResult, Member};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
