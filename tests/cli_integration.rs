//! Integration tests for the `td` CLI.
//!
//! Each test starts a mock backend, runs `td` as a subprocess pointed at
//! it, and checks stdout/stderr plus the requests the backend saw.

use std::path::Path;
use std::process::Command;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ticket_json(id: u64, title: &str, category: &str, priority: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Charged twice\nfor the May invoice",
        "category": category,
        "priority": priority,
        "status": status,
        "created_at": "2025-05-14T10:00:00Z"
    })
}

/// Run `td` against `server` from an empty directory (so no desk.toml is
/// picked up). Returns (stdout, stderr, success).
async fn run_td(server: &MockServer, args: &[&str]) -> (String, String, bool) {
    let api_url = format!("{}/api", server.uri());
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        let output = Command::new(env!("CARGO_BIN_EXE_td"))
            .args(&args)
            .arg("--api-url")
            .arg(&api_url)
            .current_dir(dir.path())
            .env_remove("TICKET_DESK_API_URL")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run td");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.success(),
        )
    })
    .await
    .unwrap()
}

async fn run_td_ok(server: &MockServer, args: &[&str]) -> String {
    let (stdout, stderr, ok) = run_td(server, args).await;
    assert!(ok, "td {:?} failed: {}", args, stderr);
    stdout
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn test_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ticket_json(2, "Printer jam", "technical", "low", "in_progress"),
            ticket_json(1, "Refund", "billing", "high", "open"),
        ])))
        .mount(&server)
        .await;

    let out = run_td_ok(&server, &["list"]).await;
    assert_eq!(
        out,
        "#2 [in_progress] technical/low Printer jam\n#1 [open] billing/high Refund\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_filters_become_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/"))
        .and(query_param("category", "billing"))
        .and(query_param("status", "open"))
        .and(query_param("search", "refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ticket_json(1, "Refund", "billing", "high", "open"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let out = run_td_ok(
        &server,
        &["list", "--category", "billing", "--status", "open", "-s", "refund", "--json"],
    )
    .await;
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["id"], "1");
    assert_eq!(parsed[0]["category"], "billing");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_rejects_unknown_category() {
    let server = MockServer::start().await;
    let (_, stderr, ok) = run_td(&server, &["list", "--category", "shipping"]).await;
    assert!(!ok);
    assert!(stderr.contains("shipping"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_tickets": 6,
            "open_tickets": 4,
            "avg_tickets_per_day": 1.5,
            "priority_breakdown": {"low": 1, "medium": 2, "high": 3, "critical": 0},
            "category_breakdown": {"billing": 3, "technical": 1, "account": 0, "general": 2}
        })))
        .mount(&server)
        .await;

    let out = run_td_ok(&server, &["stats"]).await;
    assert!(out.contains("total: 6"));
    assert!(out.contains("open: 4"));
    assert!(out.contains("avg/day: 1.5"));
    assert!(out.contains("high 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_classify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/classify/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_category": "account",
            "suggested_priority": "critical"
        })))
        .mount(&server)
        .await;

    let out = run_td_ok(&server, &["classify", "I cannot log into my account at all"]).await;
    assert_eq!(out, "category: account\npriority: critical\n");
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn test_create_keeps_explicit_priority() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/classify/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_category": "billing",
            "suggested_priority": "high"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .and(body_json(json!({
            "title": "Refund",
            "description": "I was charged twice on my invoice",
            "category": "billing",
            "priority": "low"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(ticket_json(3, "Refund", "billing", "low", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = run_td_ok(
        &server,
        &["create", "Refund", "-d", "I was charged twice on my invoice", "--priority", "low"],
    )
    .await;
    assert_eq!(out, "created #3 [open] billing/low Refund\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_short_description_skips_classifier() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/classify/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .and(body_json(json!({
            "title": "Printer",
            "description": "Tray 2 jam",
            "category": "general",
            "priority": "medium"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ticket_json(4, "Printer", "general", "medium", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    run_td_ok(&server, &["create", "Printer", "-d", "Tray 2 jam"]).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_survives_classifier_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/classify/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ticket_json(5, "Login", "general", "medium", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = run_td_ok(
        &server,
        &["create", "Login", "-d", "The login page spins forever after I submit"],
    )
    .await;
    assert!(out.starts_with("created #5"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_validation_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (_, stderr, ok) = run_td(&server, &["create", "   ", "-d", "Tray 2 jam", "--no-classify"]).await;
    assert!(!ok);
    assert!(stderr.contains("error: Title is required"));

    let long_title = "x".repeat(201);
    let (_, stderr, ok) = run_td(&server, &["create", &long_title, "-d", "Tray 2 jam"]).await;
    assert!(!ok);
    assert!(stderr.contains("Title must not exceed 200 characters"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_validation_precedes_classification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_category": "billing",
            "suggested_priority": "high"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let (_, stderr, ok) = run_td(
        &server,
        &["create", "   ", "-d", "My invoice was charged twice this month and I need a refund"],
    )
    .await;
    assert!(!ok);
    assert!(stderr.contains("error: Title is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_unrecognised_suggestion_sends_baseline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/classify/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggested_category": "shipping",
            "suggested_priority": "urgent"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .and(body_json(json!({
            "title": "Refund",
            "description": "My invoice was charged twice this month and I need a refund",
            "category": "general",
            "priority": "medium"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ticket_json(6, "Refund", "general", "medium", "open")),
        )
        .expect(1)
        .mount(&server)
        .await;

    run_td_ok(
        &server,
        &["create", "Refund", "-d", "My invoice was charged twice this month and I need a refund"],
    )
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_shows_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Duplicate ticket"})),
        )
        .mount(&server)
        .await;

    let (_, stderr, ok) =
        run_td(&server, &["create", "Refund", "-d", "Again", "--no-classify"]).await;
    assert!(!ok);
    assert!(stderr.contains("Duplicate ticket"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tickets/1/"))
        .and(body_json(json!({"status": "resolved"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ticket_json(1, "Refund", "billing", "high", "resolved")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = run_td_ok(&server, &["update", "1", "--status", "resolved"]).await;
    assert!(out.contains("#1 Refund"));
    assert!(out.contains("status: Resolved"));
    assert!(out.contains("  for the May invoice"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_requires_a_field() {
    let server = MockServer::start().await;
    let (_, stderr, ok) = run_td(&server, &["update", "1"]).await;
    assert!(!ok);
    assert!(stderr.contains("nothing to update"));
}

#[test]
fn test_help_lists_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_td"))
        .arg("--help")
        .current_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
        .output()
        .unwrap();
    let out = String::from_utf8_lossy(&output.stdout);
    for command in ["list", "create", "update", "stats", "classify"] {
        assert!(out.contains(command), "missing {command} in help");
    }
}
