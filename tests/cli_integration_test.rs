use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

fn leads_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("leads.json");
    let json = indoc! {r#"
        [
            {
                "id": "l-1",
                "name": "Pat Doe",
                "phone": "555-0100",
                "property_value": 600000,
                "roof_age_years": 18,
                "urgency": "immediate",
                "engagement_events": 0,
                "source": "website"
            },
            {
                "id": "l-2",
                "name": "Sam Smith",
                "email": "sam@example.com",
                "property_value": 150000,
                "roof_age_years": 3,
                "urgency": "exploring",
                "engagement_events": 1
            },
            {
                "id": "l-3",
                "name": "No Contact"
            }
        ]
    "#};
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn score_outputs_json_with_documented_score() {
    let dir = TempDir::new().unwrap();
    let leads = leads_file(&dir);

    let output = Command::cargo_bin("leadmap")
        .unwrap()
        .args(["score", leads.to_str().unwrap(), "--format", "json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["total"], 3);
    assert_eq!(report["scored"][0]["id"], "l-1");
    assert_eq!(report["scored"][0]["score"], 68);
    assert_eq!(report["scored"][0]["temperature"], "warm");
    assert_eq!(report["skipped"][0]["id"], "l-3");
}

#[test]
fn score_writes_markdown_to_output_file() {
    let dir = TempDir::new().unwrap();
    let leads = leads_file(&dir);
    let out = dir.path().join("report.md");

    Command::cargo_bin("leadmap")
        .unwrap()
        .args([
            "score",
            leads.to_str().unwrap(),
            "--format",
            "markdown",
            "--output",
            out.to_str().unwrap(),
        ])
        .current_dir(dir.path())
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("# Lead Scoring Report"));
    assert!(text.contains("Pat Doe"));
}

#[test]
fn stats_reports_pipeline_and_cache_state() {
    let dir = TempDir::new().unwrap();
    let leads = leads_file(&dir);

    let output = Command::cargo_bin("leadmap")
        .unwrap()
        .args(["stats", leads.to_str().unwrap(), "--format", "json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // All three leads are live records, including the unscorable one
    assert_eq!(report["statistics"]["total"], 3);
    assert_eq!(report["cache"]["status"], "enabled");
    assert_eq!(report["windows"].as_array().unwrap().len(), 4);
}

#[test]
fn warm_command_reports_per_cache_outcomes() {
    let dir = TempDir::new().unwrap();
    let leads = leads_file(&dir);

    let output = Command::cargo_bin("leadmap")
        .unwrap()
        .args(["warm", leads.to_str().unwrap(), "--show-stats"])
        .current_dir(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Warmed 6 caches, 0 failed"));
    assert!(text.contains("Cache Statistics:"));
}

#[test]
fn init_scaffolds_config_once() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("leadmap")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success();

    let config = fs::read_to_string(dir.path().join(".leadmap.toml")).unwrap();
    assert!(config.contains("[weights]"));
    assert!(config.contains("hot = 80"));

    // Second init without --force refuses to overwrite
    Command::cargo_bin("leadmap")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn missing_leads_file_fails_with_context() {
    let dir = TempDir::new().unwrap();

    let output = Command::cargo_bin("leadmap")
        .unwrap()
        .args(["score", "absent.json"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    assert!(String::from_utf8(output).unwrap().contains("absent.json"));
}
