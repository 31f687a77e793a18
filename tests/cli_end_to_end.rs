use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use serde_json::{Value, json};

fn recompile() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("recompile"));
    cmd.env_remove("CONTENTFUL_SPACE_ID")
        .env_remove("CONTENTFUL_ACCESS_TOKEN")
        .env_remove("CONTENTFUL_ENVIRONMENT")
        .env_remove("RECOMPILE_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("stdout is JSON")
}

#[test]
fn mock_mode_prints_fallback_posts() {
    let assert = recompile().args(["--mode", "mock", "posts"]).assert().success();

    let posts = stdout_json(&assert);
    let slugs: Vec<&str> = posts
        .as_array()
        .expect("post array")
        .iter()
        .filter_map(|post| post["slug"].as_str())
        .collect();
    assert_eq!(
        slugs,
        vec![
            "getting-started-with-llms",
            "architecture-outlives-code",
            "recompiling-a-career"
        ]
    );
}

#[test]
fn mock_mode_related_never_returns_the_current_post() {
    let assert = recompile()
        .args([
            "related",
            "getting-started-with-llms",
            "--tag",
            "ai",
            "--limit",
            "1",
            "--mode",
            "mock",
        ])
        .assert()
        .success();

    let related = stdout_json(&assert);
    let related = related.as_array().expect("post array");
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["slug"], "architecture-outlives-code");
}

#[test]
fn mock_mode_post_view_includes_chrome() {
    let assert = recompile()
        .args(["--mode", "mock", "post", "recompiling-a-career"])
        .assert()
        .success();

    let view = stdout_json(&assert);
    assert_eq!(view["post"]["title"], "Recompiling a Career");
    assert_eq!(view["chrome"]["settings"]["logoText"], "// please recompile");
    assert_eq!(view["chrome"]["footer"]["tagline"], "rebuilding how I build");
}

#[test]
fn live_mode_reads_from_the_delivery_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/spaces/space-9/environments/master/entries")
            .header("authorization", "Bearer cli-token")
            .query_param("content_type", "siteSettings");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                json!({
                    "items": [{"sys": {"id": "settings"}, "fields": {
                        "heroTitle": "Live from the CDN",
                        "heroSubtitle": "Subtitle from the CDN"
                    }}]
                })
                .to_string(),
            );
    });

    let assert = recompile()
        .env("CONTENTFUL_SPACE_ID", "space-9")
        .env("CONTENTFUL_ACCESS_TOKEN", "cli-token")
        .args(["--delivery-url", &server.base_url(), "hero"])
        .assert()
        .success();

    let hero = stdout_json(&assert);
    assert_eq!(hero["title"], "Live from the CDN");
    assert_eq!(hero["subtitle"], "Subtitle from the CDN");
    mock.assert();
}

#[test]
fn unreachable_cdn_still_prints_fallback_content() {
    let assert = recompile()
        .args([
            "--space-id",
            "space-9",
            "--access-token",
            "cli-token",
            "--delivery-url",
            "http://127.0.0.1:9",
            "--timeout-seconds",
            "2",
            "footer",
        ])
        .assert()
        .success();

    let footer = stdout_json(&assert);
    assert_eq!(footer["copyright"], "© 2026 Please Recompile");
}

#[test]
fn live_mode_without_credentials_fails_fast() {
    recompile()
        .arg("hero")
        .assert()
        .failure()
        .stderr(contains("content.space_id is required"));
}

#[test]
fn invalid_configuration_names_the_key() {
    recompile()
        .args(["--mode", "mock", "--timeout-seconds", "0", "hero"])
        .assert()
        .failure()
        .stderr(contains("content.timeout_seconds"));
}
