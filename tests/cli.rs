use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn future_timestamp() -> String {
    (Utc::now() + chrono::Duration::hours(1)).to_rfc3339()
}

fn write_config(temp: &Path, region: &str) -> PathBuf {
    let path = temp.join("config.yaml");
    let contents = format!(
        "api_key: test-key\nregion: {region}\nsession:\n  token: dummy\n  expires_at: {}\npreferences:\n  page_size: 250\n",
        future_timestamp()
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentraop version"));

    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "eu-central-1");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .env_remove("SENTRAOP_CONFIG")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Region: eu-central-1"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_without_config_suggests_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing.yaml");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("status")
        .arg("--config")
        .arg(&missing)
        .env_remove("SENTRAOP_CONFIG")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("sentraop init"));

    Ok(())
}

#[test]
fn thing_list_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing.yaml");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("thing")
        .arg("list")
        .arg("--config")
        .arg(&missing)
        .env_remove("SENTRAOP_CONFIG")
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("sentraop init"));

    Ok(())
}

#[test]
fn audit_suppress_requires_exactly_one_resource() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "us-east-1");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("audit")
        .arg("suppress")
        .arg("DEVICE_CERTIFICATE_EXPIRING_CHECK")
        .arg("--indefinitely")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("exactly one"));

    Ok(())
}

#[test]
fn completion_generates_bash_script() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentraop"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn thing_list_renders_api_response() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _things = server
        .mock("GET", "/api/v1/things")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "things": [
                    {
                        "thingName": "front-door-42",
                        "thingTypeName": "door-sensor",
                        "attributes": {"building": "hq"},
                        "version": 3
                    }
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "us-east-1");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("--no-cache")
        .arg("thing")
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .env("SENTRAOP_API_HOST", &api_host)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("front-door-42"));
    assert!(stdout.contains("door-sensor"));
    assert!(stdout.contains("building=hq"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn audit_task_detail_renders_check_map() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _task = server
        .mock("GET", "/api/v1/audit/tasks/task-1")
        .with_status(200)
        .with_body(
            r#"{
                "taskStatus": "COMPLETED",
                "taskType": "ON_DEMAND_AUDIT_TASK",
                "taskStartTime": 1700000000,
                "auditDetails": {
                    "DEVICE_CERTIFICATE_EXPIRING_CHECK": {
                        "checkRunStatus": "COMPLETED_COMPLIANT",
                        "totalResourcesCount": 100,
                        "nonCompliantResourcesCount": 0
                    }
                }
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "us-east-1");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("--no-cache")
        .arg("audit")
        .arg("task")
        .arg("task-1")
        .arg("--config")
        .arg(&config_path)
        .env("SENTRAOP_API_HOST", &api_host)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("COMPLETED_COMPLIANT"));
    assert!(stdout.contains("totalResourcesCount"));
    // unset fields are omitted from the rendering, not shown as null
    assert!(!stdout.contains("checkCompliant"));
    assert!(!stdout.contains("null"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn violation_active_renders_table() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let api_host = server.url();

    let _violations = server
        .mock("GET", "/api/v1/detect/violations/active")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "activeViolations": [
                    {
                        "violationId": "v-1",
                        "thingName": "hallway-7",
                        "securityProfileName": "fleet-baseline",
                        "behavior": {"name": "excessive-messages"},
                        "violationStartTime": 1700000000
                    }
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "us-east-1");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("sentraop"))
        .arg("--no-cache")
        .arg("violation")
        .arg("active")
        .arg("--config")
        .arg(&config_path)
        .env("SENTRAOP_API_HOST", &api_host)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("v-1"));
    assert!(stdout.contains("hallway-7"));
    assert!(stdout.contains("excessive-messages"));

    Ok(())
}
