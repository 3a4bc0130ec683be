use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed skill categories tracked for every member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Uiux,
    Security,
    Devops,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Uiux,
        SkillCategory::Security,
        SkillCategory::Devops,
    ];

    /// 欄位名稱 (CSV / JSON)
    pub fn key(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Uiux => "uiux",
            SkillCategory::Security => "security",
            SkillCategory::Devops => "devops",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Uiux => "UI/UX",
            SkillCategory::Security => "Security",
            SkillCategory::Devops => "DevOps",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillScores {
    pub frontend: u32,
    pub backend: u32,
    pub uiux: u32,
    pub security: u32,
    pub devops: u32,
}

impl SkillScores {
    pub fn get(&self, category: SkillCategory) -> u32 {
        match category {
            SkillCategory::Frontend => self.frontend,
            SkillCategory::Backend => self.backend,
            SkillCategory::Uiux => self.uiux,
            SkillCategory::Security => self.security,
            SkillCategory::Devops => self.devops,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub skills: SkillScores,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, skills: SkillScores) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub members: Vec<Member>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn average_skill(&self, category: SkillCategory) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .members
            .iter()
            .map(|m| u64::from(m.skills.get(category)))
            .sum();
        total as f64 / self.members.len() as f64
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            group_id: self.id.clone(),
            size: self.members.len(),
            averages: SkillAverages {
                frontend: self.average_skill(SkillCategory::Frontend),
                backend: self.average_skill(SkillCategory::Backend),
                uiux: self.average_skill(SkillCategory::Uiux),
                security: self.average_skill(SkillCategory::Security),
                devops: self.average_skill(SkillCategory::Devops),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAverages {
    pub frontend: f64,
    pub backend: f64,
    pub uiux: f64,
    pub security: f64,
    pub devops: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group_id: String,
    pub size: usize,
    pub averages: SkillAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub major: String,
    pub students: Vec<Member>,
}

/// What to do with leftover members when the roster is smaller than one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// No group is formed; the members are reported as unassigned.
    #[default]
    Drop,
    /// The whole roster becomes one undersized group.
    Undersized,
}

/// Where a roster comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    /// CSV or JSON roster file.
    File(String),
    /// Built-in class catalog, scores generated from `seed`.
    Catalog { class_id: String, seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub title: String,
    pub group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub group_size: usize,
    pub groups: Vec<Group>,
    pub unassigned: Vec<Member>,
    pub groups_generated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project: Project,
    pub summaries: Vec<GroupSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingReport {
    pub class_id: Option<String>,
    pub roster_size: usize,
    pub generated_at: DateTime<Utc>,
    pub projects: Vec<ProjectReport>,
}

#[derive(Debug, Clone)]
pub struct GroupingResult {
    pub report: GroupingReport,
    pub json_output: String,
    pub csv_output: String,
}
