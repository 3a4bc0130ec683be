use crate::core::partition::GroupPartitioner;
use crate::domain::model::{Member, Project, RemainderPolicy};
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::validate_group_size;
use chrono::Utc;
use rand::Rng;

pub const DEFAULT_GROUP_SIZE: usize = 5;

/// In-memory list of projects for one class.
#[derive(Debug, Clone, Default)]
pub struct ProjectBoard {
    projects: Vec<Project>,
    next_id: u64,
}

impl ProjectBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn create_project(&mut self, title: &str, group_size: usize) -> Result<&Project> {
        let title = title.trim();
        if title.is_empty() {
            return Err(GroupError::ValidationError {
                message: "Project title cannot be empty".to_string(),
            });
        }
        validate_group_size(group_size)?;

        self.next_id += 1;
        let project = Project {
            id: format!("project-{}", self.next_id),
            title: title.to_string(),
            group_size,
            groups: Vec::new(),
            unassigned: Vec::new(),
            groups_generated: false,
            created_at: Utc::now(),
        };
        tracing::debug!("Created project {} ({})", project.id, project.title);

        self.projects.push(project);
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Partition `roster` for the project, replacing any earlier groups.
    pub fn generate_groups<R: Rng + ?Sized>(
        &mut self,
        project_id: &str,
        roster: &[Member],
        policy: RemainderPolicy,
        rng: &mut R,
    ) -> Result<&Project> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| GroupError::ProjectNotFound {
                project_id: project_id.to_string(),
            })?;

        let partition = GroupPartitioner::new(project.group_size)?
            .with_policy(policy)
            .split(roster, rng);

        tracing::info!(
            "👥 {}: {} groups generated, {} unassigned",
            project.title,
            partition.groups.len(),
            partition.unassigned.len()
        );

        project.groups = partition.groups;
        project.unassigned = partition.unassigned;
        project.groups_generated = true;
        Ok(project)
    }

    pub fn delete_project(&mut self, project_id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != project_id);
        self.projects.len() != before
    }
}
