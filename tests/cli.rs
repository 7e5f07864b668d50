// ABOUTME: Integration tests for the asc-deploy binary.
// ABOUTME: Validates --help output, early failures, and reporting around a failed remote call.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn asc_deploy_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("asc-deploy"));
    for var in [
        "INPUT_AZURE-SUBSCRIPTION",
        "INPUT_SERVICE-NAME",
        "INPUT_APP-NAME",
        "INPUT_ACTION",
        "INPUT_PACKAGE",
        "INPUT_DEPLOYMENT-NAME",
        "INPUT_USE-STAGING-DEPLOYMENT",
        "AZURE_RESOURCE_MANAGER_ENDPOINT",
        "AZURE_ACCESS_TOKEN",
        "AZURE_TENANT_ID",
        "AZURE_CLIENT_ID",
        "AZURE_CLIENT_SECRET",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_task_inputs() {
    asc_deploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--azure-subscription"))
        .stdout(predicate::str::contains("--use-staging-deployment"))
        .stdout(predicate::str::contains("--environment-variables"))
        .stdout(predicate::str::contains("--no-wait"));
}

#[test]
fn missing_inputs_fail_with_message() {
    let dir = tempfile::tempdir().unwrap();
    asc_deploy_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: missing required input: azure-subscription",
        ));
}

#[test]
fn unknown_action_fails() {
    let dir = tempfile::tempdir().unwrap();
    asc_deploy_cmd()
        .current_dir(dir.path())
        .env("INPUT_AZURE-SUBSCRIPTION", "sub-1")
        .env("INPUT_SERVICE-NAME", "orders-svc")
        .env("INPUT_APP-NAME", "api")
        .env("INPUT_ACTION", "restart")
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownOrUnsupportedAction: restart"));
}

#[test]
fn named_target_needs_deployment_name() {
    let dir = tempfile::tempdir().unwrap();
    asc_deploy_cmd()
        .current_dir(dir.path())
        .args([
            "--azure-subscription",
            "sub-1",
            "--service-name",
            "orders-svc",
            "--app-name",
            "api",
            "--action",
            "promote",
            "--use-staging-deployment",
            "false",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deployment name is required"));
}

#[test]
fn json_mode_reports_errors_as_events() {
    let dir = tempfile::tempdir().unwrap();
    asc_deploy_cmd()
        .current_dir(dir.path())
        .arg("--json")
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""event":"error""#));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    asc_deploy_cmd()
        .current_dir(dir.path())
        .args(["--config", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn warnings_are_reported_when_the_action_fails() {
    let server = MockServer::start().await;
    let service_path =
        "/subscriptions/sub-1/resourceGroups/rg-apps/providers/Microsoft.AppPlatform/Spring/orders-svc";

    Mock::given(method("GET"))
        .and(path("/subscriptions/sub-1/providers/Microsoft.AppPlatform/Spring"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": service_path, "name": "orders-svc"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(service_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": service_path, "name": "orders-svc"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{service_path}/apps/api/deployments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"name": "blue", "properties": {"active": false}},
                {"name": "green", "properties": {"active": false}},
                {"name": "production", "properties": {"active": true}},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{service_path}/apps/api")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        asc_deploy_cmd()
            .current_dir(dir.path())
            .env("AZURE_ACCESS_TOKEN", "test-token")
            .args([
                "--json",
                "--azure-subscription",
                "sub-1",
                "--service-name",
                "orders-svc",
                "--app-name",
                "api",
                "--action",
                "set production",
                "--management-endpoint",
                endpoint.as_str(),
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let warning = stderr
        .find(r#""event":"warning""#)
        .expect("warning event on stderr");
    let error = stderr
        .find(r#""event":"error""#)
        .expect("error event on stderr");
    assert!(warning < error, "{stderr}");
    assert!(stderr.contains("SetActiveDeploymentError"), "{stderr}");
}
