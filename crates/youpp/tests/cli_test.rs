//! Integration tests for the `youpp` CLI binary.
//!
//! Argument parsing, config handling, and exit codes run without any
//! backend. Site and render commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `youpp` binary with env isolation.
///
/// Clears every `YOUPP_*` variable the CLI reads and points the config
/// file into `dir`, so tests never touch the user's real configuration.
fn youpp_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("youpp");
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("YOUPP_CONFIG", config_file(dir))
        .env("NO_COLOR", "1")
        .env_remove("YOUPP_PROFILE")
        .env_remove("YOUPP_DEFAULT_PROFILE")
        .env_remove("YOUPP_API_BASE_URL")
        .env_remove("YOUPP_BACKEND_BASE_URL")
        .env_remove("YOUPP_TOKEN")
        .env_remove("YOUPP_OUTPUT")
        .env_remove("YOUPP_TIMEOUT")
        .env_remove("YOUPP_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn config_file(dir: &Path) -> PathBuf {
    dir.join("youpp").join("config.toml")
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a blocking command without stalling the mock server's runtime.
async fn run(mut cmd: assert_cmd::Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Admin command wired to `server` with an in-memory token.
fn admin_cmd(dir: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = youpp_cmd(dir);
    cmd.env("YOUPP_API_BASE_URL", server.uri())
        .env("YOUPP_TOKEN", "test-token");
    cmd
}

fn site_json(status: &str) -> Value {
    json!({
        "id": "site-1",
        "name": "Ada's Bakery",
        "slug": "adas-bakery",
        "status": status,
        "content": {
            "sections": [
                { "type": "hero", "data": { "title": "Fresh bread", "subtitle": "Daily" } },
                { "type": "gallery", "data": { "images": [] } },
                { "type": "cta", "data": { "title": "Order now", "buttonText": "Go" } }
            ]
        }
    })
}

async fn mount_sites(server: &MockServer, sites: Value) {
    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sites))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = youpp_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("youpp site builder")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("site"))
            .and(predicate::str::contains("render")),
    );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("youpp"));
}

#[test]
fn test_invalid_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let output = youpp_cmd(dir.path()).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("foobar"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("youpp"));
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_override() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            config_file(dir.path()).display().to_string(),
        ));
}

#[test]
fn test_config_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["config", "set", "api_base_url", "https://api.youpp.test/"])
        .assert()
        .success();
    youpp_cmd(dir.path())
        .args(["config", "set", "email", "ada@example.com"])
        .assert()
        .success();

    assert!(config_file(dir.path()).exists());

    youpp_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.default]")
                .and(predicate::str::contains(
                    "api_base_url = \"https://api.youpp.test\"",
                ))
                .and(predicate::str::contains("email = \"ada@example.com\"")),
        );

    youpp_cmd(dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));
}

#[test]
fn test_config_set_rejects_bad_timeout() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
    assert!(!config_file(dir.path()).exists());
}

#[test]
fn test_config_use_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["config", "use", "staging"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

const BROKEN_CONFIG: &str = "[defaults]\ntimeout = \"soon\"\n\n[profiles.prod]\napi_base_url = \"https://prod.youpp.test\"\n";

fn write_broken_config(dir: &Path) {
    let path = config_file(dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, BROKEN_CONFIG).unwrap();
}

#[test]
fn test_config_set_keeps_unparseable_file() {
    let dir = tempfile::tempdir().unwrap();
    write_broken_config(dir.path());

    youpp_cmd(dir.path())
        .args(["config", "set", "email", "a@b.c"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Set email").not());

    let contents = std::fs::read_to_string(config_file(dir.path())).unwrap();
    assert_eq!(contents, BROKEN_CONFIG);
}

#[test]
fn test_config_use_keeps_unparseable_file() {
    let dir = tempfile::tempdir().unwrap();
    write_broken_config(dir.path());

    youpp_cmd(dir.path())
        .args(["config", "use", "prod"])
        .assert()
        .code(2);

    let contents = std::fs::read_to_string(config_file(dir.path())).unwrap();
    assert_eq!(contents, BROKEN_CONFIG);
}

// ── Missing configuration ───────────────────────────────────────────

#[test]
fn test_site_show_without_api_url() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["site", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("api_base_url is not configured"));
}

#[test]
fn test_render_without_backend_url() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["render", "adas-bakery"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("backend_base_url is not configured"));
}

#[test]
fn test_invalid_api_url() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["--api-url", "not a url", "site", "show"])
        .assert()
        .code(2);
}

// ── Admin commands against a mock backend ───────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_site_show_json() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("published")])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "show", "-o", "json"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let site: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(site["slug"], "adas-bakery");
    assert_eq!(site["status"], "published");
    assert_eq!(site["sections"][1]["type"], "gallery");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_show_table() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "show"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Ada's Bakery"));
    assert!(text.contains("DRAFT"));
    assert!(text.contains("Fresh bread"));
    assert!(text.contains("Last saved:  Never"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_sections_plain() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "sections", "-o", "plain"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hero\ngallery\ncta\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_show_without_site() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "show"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("youpp site create"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "show"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("Unauthorized"), "{text}");
    assert!(!text.contains("token expired"), "{text}");
}

#[test]
fn test_site_show_without_session() {
    let dir = tempfile::tempdir().unwrap();
    youpp_cmd(dir.path())
        .args(["--api-url", "http://127.0.0.1:9", "site", "show"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_edit_saves_hero_and_cta() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/sites/site-1/content"))
        .and(body_json(json!({
            "content": {
                "sections": [
                    { "type": "hero", "data": { "title": "Hot rolls", "subtitle": "Daily" } },
                    { "type": "cta", "data": { "title": "Order now", "buttonText": "Go" } }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "edit", "--hero-title", "Hot rolls"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Saved at"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_edit_requires_a_field() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "edit"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Nothing to change"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_toggle_publishes_draft() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    Mock::given(method("POST"))
        .and(path("/api/sites/site-1/publish"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "toggle"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Site published"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_create_derives_slug() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .and(body_json(json!({ "name": "Ada's Bakery", "slug": "ada-s-bakery" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "site-9",
            "name": "Ada's Bakery",
            "slug": "ada-s-bakery",
            "status": "draft"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "create", "--name", "Ada's Bakery", "-o", "plain"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ada-s-bakery");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_create_when_one_exists() {
    let server = MockServer::start().await;
    mount_sites(&server, json!([site_json("draft")])).await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = admin_cmd(dir.path(), &server);
    cmd.args(["site", "create", "--name", "Second"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(6));
}

// ── Public render ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_render_published_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/adas-bakery"))
        .and(header("cache-control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "adas-bakery",
            "published": true,
            "content": site_json("published")["content"].clone()
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = youpp_cmd(dir.path());
    cmd.env("YOUPP_BACKEND_BASE_URL", server.uri())
        .args(["render", "adas-bakery"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("adas-bakery"));
    assert!(html.contains("Fresh bread"));
    assert!(html.contains("Order now"));
    assert!(!html.contains("gallery"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_skips_malformed_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/adas-bakery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "adas-bakery",
            "published": true,
            "content": { "sections": [
                { "type": "hero", "data": { "title": "Welcome" } },
                { "kind": "gallery", "data": {} },
                { "type": 3, "data": {} },
                { "type": "cta", "data": { "title": null, "buttonText": "Order" } }
            ] }
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = youpp_cmd(dir.path());
    cmd.env("YOUPP_BACKEND_BASE_URL", server.uri())
        .args(["render", "adas-bakery"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("<h1>Welcome</h1>"));
    assert!(html.contains("<h2></h2>"));
    assert!(html.contains(">Order</a>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_unpublished_site_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/adas-bakery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "adas-bakery",
            "published": false,
            "content": site_json("draft")["content"].clone()
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = youpp_cmd(dir.path());
    cmd.env("YOUPP_BACKEND_BASE_URL", server.uri())
        .args(["render", "adas-bakery"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("Site not found"));
    assert!(!html.contains("Fresh bread"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_render_missing_site_writes_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("page.html");

    let mut cmd = youpp_cmd(dir.path());
    cmd.env("YOUPP_BACKEND_BASE_URL", server.uri())
        .args(["render", "nobody", "--out"])
        .arg(&out);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("does not exist or is not published yet"));
}
