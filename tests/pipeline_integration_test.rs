use group_forge::core::Pipeline;
use group_forge::{
    CliConfig, GroupError, GroupingEngine, LocalStorage, RemainderPolicy, RosterPipeline,
    TomlConfig,
};
use std::io::Read;
use tempfile::TempDir;

fn cli_config(output_path: &str) -> CliConfig {
    CliConfig {
        class: Some("CI1-GI".to_string()),
        roster: None,
        catalog_seed: 1,
        group_size: 5,
        projects: vec!["Web app".to_string()],
        remainder_policy: RemainderPolicy::Drop,
        seed: Some(42),
        output_path: output_path.to_string(),
        formats: vec!["json".to_string(), "csv".to_string()],
        archive: false,
        list_classes: false,
        verbose: false,
        log_json: false,
    }
}

const ROSTER_CSV: &str = "\
id,name,frontend,backend,uiux,security,devops
s1,Ada,90,40,70,20,10
s2,Linus,30,95,10,60,80
s3,Grace,55,75,35,45,65
s4,Alan,20,60,30,90,50
s5,Barbara,70,50,80,30,40
s6,Ken,10,85,20,70,95
s7,Margaret,65,45,55,35,25
";

#[tokio::test]
async fn test_catalog_class_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = RosterPipeline::new(storage, cli_config(&output_path));
    let engine = GroupingEngine::new(pipeline);

    let written = engine.run().await.unwrap();
    assert!(written.contains("groups.json"));
    assert!(written.contains("groups.csv"));

    let json = std::fs::read_to_string(temp_dir.path().join("groups.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["class_id"], "CI1-GI");
    assert_eq!(report["roster_size"], 52);

    let project = &report["projects"][0]["project"];
    assert_eq!(project["title"], "Web app");
    assert_eq!(project["groups_generated"], true);
    // 52 人每組 5 人: 10 組，前兩組 6 人
    let groups = project["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 10);
    assert_eq!(groups[0]["members"].as_array().unwrap().len(), 6);
    assert_eq!(groups[1]["members"].as_array().unwrap().len(), 6);
    assert_eq!(groups[2]["members"].as_array().unwrap().len(), 5);
    assert_eq!(report["projects"][0]["summaries"].as_array().unwrap().len(), 10);

    let csv = std::fs::read_to_string(temp_dir.path().join("groups.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "project,group_id,member_id,member_name,frontend,backend,uiux,security,devops"
    );
    assert_eq!(lines.count(), 52);
}

#[tokio::test]
async fn test_roster_file_with_fixed_seed_is_reproducible() {
    let temp_dir = TempDir::new().unwrap();
    let roster_path = temp_dir.path().join("class.csv");
    std::fs::write(&roster_path, ROSTER_CSV).unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.class = None;
    config.roster = Some(roster_path.to_str().unwrap().to_string());
    config.group_size = 3;

    let pipeline = RosterPipeline::new(LocalStorage::new(output_path.clone()), config.clone());
    let roster = pipeline.extract().await.unwrap();
    assert_eq!(roster.len(), 7);

    let first = pipeline.transform(roster.clone()).await.unwrap();
    let second = pipeline.transform(roster).await.unwrap();

    let groups_a = &first.report.projects[0].project.groups;
    let groups_b = &second.report.projects[0].project.groups;
    assert_eq!(groups_a, groups_b);
    assert_eq!(groups_a.len(), 2);
    assert_eq!(groups_a[0].len(), 4);
    assert_eq!(groups_a[1].len(), 3);
    assert!(first.report.class_id.is_none());
}

#[tokio::test]
async fn test_small_roster_reports_unassigned_members() {
    let temp_dir = TempDir::new().unwrap();
    let roster_path = temp_dir.path().join("class.csv");
    std::fs::write(&roster_path, ROSTER_CSV).unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.class = None;
    config.roster = Some(roster_path.to_str().unwrap().to_string());
    config.group_size = 10;
    config.formats = vec!["csv".to_string()];

    let pipeline = RosterPipeline::new(LocalStorage::new(output_path.clone()), config);
    let roster = pipeline.extract().await.unwrap();
    let result = pipeline.transform(roster).await.unwrap();

    let project = &result.report.projects[0].project;
    assert!(project.groups.is_empty());
    assert_eq!(project.unassigned.len(), 7);
    assert_eq!(result.csv_output.matches(",unassigned,").count(), 7);

    let written = pipeline.load(result).await.unwrap();
    assert!(written.ends_with("groups.csv"));
    assert!(!temp_dir.path().join("groups.json").exists());
}

#[tokio::test]
async fn test_archive_bundles_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.archive = true;
    config.projects = vec!["Web app".to_string(), "Security audit".to_string()];

    let engine = GroupingEngine::new(RosterPipeline::new(
        LocalStorage::new(output_path.clone()),
        config,
    ));
    let written = engine.run().await.unwrap();
    assert!(written.ends_with("groups.zip"));

    let zip_data = std::fs::read(temp_dir.path().join("groups.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut json = String::new();
    archive
        .by_name("groups.json")
        .unwrap()
        .read_to_string(&mut json)
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["projects"].as_array().unwrap().len(), 2);
    assert_eq!(report["projects"][1]["project"]["title"], "Security audit");
}

#[tokio::test]
async fn test_repeated_format_written_once_in_archive() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.archive = true;
    config.formats = vec!["json".to_string(), "json".to_string()];

    let pipeline = RosterPipeline::new(LocalStorage::new(output_path.clone()), config);
    let roster = pipeline.extract().await.unwrap();
    let result = pipeline.transform(roster).await.unwrap();
    let written = pipeline.load(result).await.unwrap();
    assert!(written.ends_with("groups.zip"));

    let zip_data = std::fs::read(temp_dir.path().join("groups.zip")).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 1);
}

#[tokio::test]
async fn test_unknown_class_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.class = Some("CI9-XX".to_string());

    let engine = GroupingEngine::new(RosterPipeline::new(
        LocalStorage::new(output_path),
        config,
    ));
    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, GroupError::UnknownClass { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_duplicate_roster_ids_fail_extract() {
    let temp_dir = TempDir::new().unwrap();
    let roster_path = temp_dir.path().join("class.json");
    std::fs::write(
        &roster_path,
        r#"[
            {"id": "s1", "name": "Ada", "skills": {"frontend": 1, "backend": 1, "uiux": 1, "security": 1, "devops": 1}},
            {"id": "s1", "name": "Ada again", "skills": {"frontend": 2, "backend": 2, "uiux": 2, "security": 2, "devops": 2}}
        ]"#,
    )
    .unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = cli_config(&output_path);
    config.class = None;
    config.roster = Some(roster_path.to_str().unwrap().to_string());

    let pipeline = RosterPipeline::new(LocalStorage::new(output_path), config);
    let err = pipeline.extract().await.unwrap_err();
    assert!(matches!(err, GroupError::DuplicateMember { .. }));
}

#[tokio::test]
async fn test_toml_config_drives_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let toml_content = format!(
        r#"
[roster]
class_id = "CI2-GE"

[grouping]
seed = 7

[[projects]]
title = "Circuits"
group_size = 4

[[projects]]
title = "Thesis"
group_size = 50

[output]
output_path = "{}"
output_formats = ["json"]
"#,
        output_path
    );

    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    let engine = GroupingEngine::new(RosterPipeline::new(
        LocalStorage::new(output_path.clone()),
        config,
    ));
    engine.run().await.unwrap();

    let json = std::fs::read_to_string(temp_dir.path().join("groups.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["roster_size"], 48);

    let circuits = &report["projects"][0]["project"];
    assert_eq!(circuits["groups"].as_array().unwrap().len(), 12);

    // 48 人不足一組 50 人，預設不成組
    let thesis = &report["projects"][1]["project"];
    assert!(thesis["groups"].as_array().unwrap().is_empty());
    assert_eq!(thesis["unassigned"].as_array().unwrap().len(), 48);
}
