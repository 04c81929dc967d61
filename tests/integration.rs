//! Integration tests for graphsift.

use graphsift::core::criterion::{SearchCriterion, SearchOperator};
use graphsift::core::events::{InMemoryEventSink, SearchEventPayload};
use graphsift::core::node::{Node, NodeGraph};
use graphsift::core::search::{SearchAction, SearchManager, SearchOptions};
use std::process::Command;
use std::sync::{Arc, RwLock};

fn people_graph() -> Arc<RwLock<NodeGraph>> {
    let mut graph = NodeGraph::new();
    graph
        .add_node(
            Node::new("1")
                .with_display_value("Anna K.")
                .with_attribute("Name", "Anna"),
        )
        .expect("add node");
    graph
        .add_node(
            Node::new("2")
                .with_display_value("Ben T.")
                .with_attribute("Name", "Ben"),
        )
        .expect("add node");
    graph
        .add_node(
            Node::new("3")
                .with_display_value("Anya P.")
                .with_attribute("Name", "Anya"),
        )
        .expect("add node");
    graph.add_edge("1", "2").expect("add edge");
    Arc::new(RwLock::new(graph))
}

#[test]
fn select_search_end_to_end() {
    let sink = Arc::new(InMemoryEventSink::new());
    let mut manager = SearchManager::new(people_graph()).with_event_sink(sink.clone());

    let criteria = [SearchCriterion::targeted(
        "Name",
        SearchOperator::StartsWith,
        "An",
        false,
    )];
    let outcome = manager
        .find(&criteria, SearchOptions::select())
        .expect("search");

    assert_eq!(outcome.match_count, 2);
    assert_eq!(outcome.matched, vec!["1", "3"]);
    assert!(manager.selection().is_selected("1"));
    assert!(manager.selection().is_selected("3"));
    assert!(!manager.selection().is_selected("2"));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    match &events[1].payload {
        SearchEventPayload::SearchCompleted {
            query,
            action,
            match_count,
        } => {
            assert_eq!(*match_count, 2);
            assert_eq!(*action, SearchAction::Select);
            assert!(query.contains("starts with"));
        }
        other => panic!("expected completion event, got {other:?}"),
    }
}

#[test]
fn search_select_then_clear_flow() {
    let sink = Arc::new(InMemoryEventSink::new());
    let mut manager = SearchManager::new(people_graph()).with_event_sink(sink.clone());

    let criteria = [SearchCriterion::wildcard(
        SearchOperator::Contains,
        "an",
        false,
    )];
    manager
        .find(&criteria, SearchOptions::select())
        .expect("search");
    assert!(manager.selection().are_any_nodes_selected());

    // Clearing the search turns off the selection and fires no new events.
    let events_before = sink.len();
    let outcome = manager.find(&[], SearchOptions::select()).expect("clear");
    assert!(outcome.cleared);
    assert!(!manager.selection().are_any_nodes_selected());
    assert_eq!(sink.len(), events_before);
}

#[test]
fn filter_search_end_to_end() {
    let mut manager = SearchManager::new(people_graph());

    // Wildcard scans also see the display value on this path: "Anya P."
    // only matches via its display value.
    let criteria = [SearchCriterion::wildcard(
        SearchOperator::Contains,
        "p.",
        false,
    )];
    let outcome = manager
        .find(&criteria, SearchOptions::filter())
        .expect("search");

    assert_eq!(outcome.matched, vec!["3"]);
    assert!(manager.filter().is_active());
    assert!(!manager.filter().is_visible("1"));
    assert!(manager.filter().is_visible("3"));
}

// ── CLI ──

fn run_graphsift(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_graphsift"))
        .args(args)
        .output()
        .expect("run graphsift");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn write_graph_document(dir: &std::path::Path) -> String {
    let path = dir.join("graph.json");
    let document = r#"{
  "nodes": [
    {"id": "1", "display_value": "Anna K.", "attributes": {"Name": "Anna"}},
    {"id": "2", "display_value": "Ben T.", "attributes": {"Name": "Ben"}},
    {"id": "3", "display_value": "Anya P.", "attributes": {"Name": "Anya"}}
  ],
  "edges": [
    {"source": "1", "target": "2"}
  ]
}"#;
    std::fs::write(&path, document).expect("write graph document");
    path.to_string_lossy().to_string()
}

#[test]
fn cli_search_select_reports_matches_as_json() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_graph_document(tmp.path());

    let (code, out, err) = run_graphsift(&[
        "-f",
        "json",
        "search",
        &graph,
        "--action",
        "select",
        "--field",
        "Name",
        "--operator",
        "starts-with",
        "--value",
        "An",
    ]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["success"], true);

    let data = &response["data"];
    assert_eq!(data["match_count"], 2);
    assert_eq!(data["matched"], serde_json::json!(["1", "3"]));
    assert_eq!(data["selected"], serde_json::json!(["1", "3"]));
    assert_eq!(data["filter_active"], false);
    assert_eq!(data["events"].as_array().map(Vec::len), Some(2));
}

#[test]
fn cli_search_with_criteria_json_combines_as_conjunction() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_graph_document(tmp.path());

    let criteria = r#"[
        {"target_field": "Name", "operator": "contains", "value": "a"},
        {"target_field": "Name", "operator": "contains", "value": "y"}
    ]"#;
    let (code, out, err) = run_graphsift(&[
        "-f", "json", "search", &graph, "--action", "filter", "--criteria", criteria,
    ]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    let data = &response["data"];
    assert_eq!(data["matched"], serde_json::json!(["3"]));
    assert_eq!(data["filter_active"], true);
    assert_eq!(data["visible"], serde_json::json!(["3"]));
}

#[test]
fn cli_wildcard_search_without_field() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_graph_document(tmp.path());

    let (code, out, err) = run_graphsift(&[
        "-f",
        "json",
        "search",
        &graph,
        "--operator",
        "contains",
        "--value",
        "nn",
    ]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["matched"], serde_json::json!(["1"]));
}

#[test]
fn cli_rejects_wildcard_prefix_search() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_graph_document(tmp.path());

    let (code, _out, err) = run_graphsift(&[
        "search",
        &graph,
        "--operator",
        "starts-with",
        "--value",
        "An",
    ]);

    assert_eq!(code, 3, "{err}");
    assert!(err.contains("unsupported_wildcard_operator") || err.contains("cannot scan"), "{err}");
}

#[test]
fn cli_missing_graph_document_maps_to_not_found() {
    let (code, _out, err) = run_graphsift(&[
        "search",
        "/nonexistent/graph.json",
        "--operator",
        "contains",
        "--value",
        "x",
    ]);

    assert_eq!(code, 2, "{err}");
    assert!(err.contains("graph_not_found") || err.contains("Cannot read"), "{err}");
}

#[test]
fn cli_nodes_lists_graph_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_graph_document(tmp.path());

    let (code, out, err) = run_graphsift(&["-f", "json", "nodes", &graph]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    let nodes = response["data"].as_array().expect("node list");
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["id"], "1");
    assert_eq!(nodes[0]["display_value"], "Anna K.");
}

#[test]
fn cli_version_runs() {
    let (code, out, _err) = run_graphsift(&["version"]);
    assert_eq!(code, 0);
    assert!(out.contains("graphsift"));
}
