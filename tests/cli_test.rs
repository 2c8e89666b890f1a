//! Integration tests for the devops-agent binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ALARM: &str = r#"{
  "version": "0",
  "source": "aws.cloudwatch",
  "account": "123456789012",
  "region": "us-east-1",
  "detail": {
    "alarmName": "HighCPU",
    "state": {"value": "ALARM", "reason": "Threshold Crossed"}
  }
}"#;

/// A command with a clean deployment environment.
fn agent(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("devops-agent"));
    cmd.current_dir(project)
        .env_remove("CDK_DEFAULT_ACCOUNT")
        .env_remove("CDK_DEFAULT_REGION")
        .env_remove("DEVOPS_AGENT_COMMAND")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn cli_no_args_synthesizes_dev() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Synthesized DevopsAgentStack-dev"));

    let template = temp.path().join("cdk.out/DevopsAgentStack-dev.template.json");
    assert!(template.exists());
    Ok(())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("dedup"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn synth_prod_uses_region_variable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .env("CDK_DEFAULT_REGION", "eu-west-1")
        .args(["synth", "-c", "environment=prod", "--json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aws://unknown-account/eu-west-1"))
        .stdout(predicate::str::contains("DevopsAgentStack-prod.template.json"));

    assert!(!temp.path().join("cdk.out").exists());
    Ok(())
}

#[test]
fn synth_passes_account_through() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .env("CDK_DEFAULT_ACCOUNT", "111122223333")
        .args(["synth", "-o", "out"])
        .assert()
        .success();

    let manifest = fs::read_to_string(temp.path().join("out/manifest.json"))?;
    let manifest: serde_json::Value = serde_json::from_str(&manifest)?;
    assert_eq!(
        manifest["artifacts"]["DevopsAgentStack-dev"]["environment"],
        "aws://111122223333/us-east-1"
    );
    Ok(())
}

#[test]
fn synth_reads_cdk_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("cdk.json"),
        r#"{"app": "devops-agent synth", "context": {"environment": "prod"}}"#,
    )?;

    agent(temp.path())
        .arg("synth")
        .assert()
        .success()
        .stdout(predicate::str::contains("DevopsAgentStack-prod"));
    Ok(())
}

#[test]
fn synth_unknown_environment_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .args(["synth", "--context", "environment=staging"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown environment 'staging'"));

    assert!(!temp.path().join("cdk.out").exists());
    Ok(())
}

#[test]
fn synth_rejects_malformed_context() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .args(["synth", "-c", "environment"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
    Ok(())
}

#[test]
fn project_flag_sets_root() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let project = temp.path().join("infra");
    fs::create_dir_all(&project)?;

    agent(temp.path())
        .args(["--project", project.to_str().unwrap(), "synth"])
        .assert()
        .success();

    assert!(project.join("cdk.out/manifest.json").exists());
    Ok(())
}

#[test]
fn config_json_shows_plan() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = agent(temp.path())
        .args(["config", "--json"])
        .output()?;

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan["environment"], "dev");
    assert_eq!(plan["source"], "default");
    assert_eq!(plan["props"]["env"]["region"], "us-east-1");
    assert_eq!(plan["props"]["tags"]["Purpose"], "AWS-AI-Agent-Hackathon");
    Ok(())
}

#[test]
fn config_quiet_hides_fields() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .args(["config", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region").not());
    Ok(())
}

#[test]
fn double_quiet_keeps_only_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let event = temp.path().join("alarm.json");
    fs::write(&event, ALARM)?;

    agent(temp.path())
        .args(["-qq", "dedup", "--event", event.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("New incident processed").not())
        .stdout(predicate::str::contains(r#""action":"forwarded""#));
    Ok(())
}

#[test]
fn dedup_forwards_then_ignores() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let event = temp.path().join("alarm.json");
    fs::write(&event, ALARM)?;

    agent(temp.path())
        .args(["dedup", "--event", event.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""action":"forwarded""#));

    agent(temp.path())
        .args(["dedup", "--event", event.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""action":"ignored""#));

    let outbox = fs::read_to_string(temp.path().join(".devops-agent/events.jsonl"))?;
    assert_eq!(outbox.lines().count(), 1);
    Ok(())
}

#[test]
fn dedup_missing_event_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .args(["dedup", "--event", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Event file not found"));
    Ok(())
}

#[test]
fn handle_outbox_event_uses_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let alarm = temp.path().join("alarm.json");
    fs::write(&alarm, ALARM)?;

    agent(temp.path())
        .args(["dedup", "--event", alarm.to_str().unwrap()])
        .assert()
        .success();

    let outbox = fs::read_to_string(temp.path().join(".devops-agent/events.jsonl"))?;
    let incident = temp.path().join("incident.json");
    fs::write(&incident, outbox.lines().next().unwrap_or_default())?;

    agent(temp.path())
        .args(["handle", "--event", incident.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_high_detected"));

    let records = fs::read_to_string(temp.path().join(".devops-agent/incidents.jsonl"))?;
    assert!(records.contains(r#""status":"completed""#));
    Ok(())
}

#[test]
fn handle_malformed_event_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let incident = temp.path().join("incident.json");
    fs::write(&incident, "{not json")?;

    agent(temp.path())
        .args(["handle", "--event", incident.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid event"));
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    agent(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("devops-agent"));
    Ok(())
}
