//! Roster parsing/validation and result rendering.

use crate::domain::model::{GroupingReport, Member, SkillCategory, SkillScores};
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::{validate_file_extension, validate_non_empty_string, validate_range};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_SKILL_SCORE: u32 = 100;
pub const UNASSIGNED_GROUP_ID: &str = "unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Csv,
    Json,
}

impl RosterFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        match validate_file_extension("roster", path, &["csv", "json"])?.as_str() {
            "json" => Ok(RosterFormat::Json),
            _ => Ok(RosterFormat::Csv),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    id: String,
    name: String,
    frontend: u32,
    backend: u32,
    uiux: u32,
    security: u32,
    devops: u32,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::new(
            row.id,
            row.name,
            SkillScores {
                frontend: row.frontend,
                backend: row.backend,
                uiux: row.uiux,
                security: row.security,
                devops: row.devops,
            },
        )
    }
}

#[derive(Debug, Serialize)]
struct AssignmentRow<'a> {
    project: &'a str,
    group_id: &'a str,
    member_id: &'a str,
    member_name: &'a str,
    frontend: u32,
    backend: u32,
    uiux: u32,
    security: u32,
    devops: u32,
}

impl<'a> AssignmentRow<'a> {
    fn new(project: &'a str, group_id: &'a str, member: &'a Member) -> Self {
        Self {
            project,
            group_id,
            member_id: &member.id,
            member_name: &member.name,
            frontend: member.skills.frontend,
            backend: member.skills.backend,
            uiux: member.skills.uiux,
            security: member.skills.security,
            devops: member.skills.devops,
        }
    }
}

pub fn parse_roster(data: &[u8], format: RosterFormat) -> Result<Vec<Member>> {
    let members = match format {
        RosterFormat::Json => serde_json::from_slice::<Vec<Member>>(data)?,
        RosterFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            let mut members = Vec::new();
            for row in reader.deserialize::<MemberRow>() {
                members.push(row?.into());
            }
            members
        }
    };

    validate_roster(&members)?;
    tracing::debug!("Parsed roster with {} members", members.len());
    Ok(members)
}

/// 成員 id 不可重複、名稱不可空白、分數需在 0..=100
pub fn validate_roster(members: &[Member]) -> Result<()> {
    let mut seen = HashSet::new();
    for member in members {
        validate_non_empty_string("member.id", &member.id)?;
        validate_non_empty_string("member.name", &member.name)?;
        if !seen.insert(member.id.as_str()) {
            return Err(GroupError::DuplicateMember {
                id: member.id.clone(),
            });
        }
        for category in SkillCategory::ALL {
            validate_range(
                &format!("{}.{}", member.id, category.key()),
                member.skills.get(category),
                0,
                MAX_SKILL_SCORE,
            )?;
        }
    }
    Ok(())
}

pub fn render_csv(report: &GroupingReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for entry in &report.projects {
        let project = &entry.project;
        for group in &project.groups {
            for member in &group.members {
                writer.serialize(AssignmentRow::new(&project.title, &group.id, member))?;
            }
        }
        for member in &project.unassigned {
            writer.serialize(AssignmentRow::new(&project.title, UNASSIGNED_GROUP_ID, member))?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| GroupError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| GroupError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn render_json(report: &GroupingReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
