//! Graphsift CLI entrypoint.

use clap::Parser;
use graphsift::cli::commands::{Cli, Commands, NodesArgs, SearchArgs};
use graphsift::cli::output::{create_table, output, output_error, OutputFormat, TableRow};
use graphsift::core::criterion::SearchCriterion;
use graphsift::core::error::{ExitCode, Result, SiftError};
use graphsift::core::events::{InMemoryEventSink, SearchEvent};
use graphsift::core::node::{GraphDocument, NodeGraph};
use graphsift::core::search::{SearchManager, SearchOptions, SearchOutcome};
use serde::Serialize;
use std::process;
use std::sync::{Arc, RwLock};

fn main() {
    let cli = Cli::parse();
    let format = cli.format;

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => output_error(&err, format),
    };
    process::exit(code.into());
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            output_version(cli.format);
            Ok(())
        }
        Commands::Search(args) => run_search(&args, cli.format),
        Commands::Nodes(args) => run_nodes(&args, cli.format),
    }
}

fn output_version(format: OutputFormat) {
    let version = env!("CARGO_PKG_VERSION");
    match format {
        OutputFormat::Table => {
            println!("graphsift {version}");
        }
        _ => {
            let payload = serde_json::json!({
                "name": "graphsift",
                "version": version
            });
            if let Err(err) = output(payload, format) {
                eprintln!("Failed to render version: {err}");
            }
        }
    }
}

/// Full report of one CLI search invocation.
#[derive(Debug, Serialize)]
struct SearchReport {
    #[serde(flatten)]
    outcome: SearchOutcome,
    selected: Vec<String>,
    filter_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<Vec<String>>,
    events: Vec<SearchEvent>,
}

#[derive(Debug, Serialize)]
struct NodeSummary {
    id: String,
    display_value: String,
    attributes: usize,
}

impl TableRow for NodeSummary {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_value.clone(),
            self.attributes.to_string(),
        ]
    }
}

fn run_search(args: &SearchArgs, format: OutputFormat) -> Result<()> {
    let graph = Arc::new(RwLock::new(load_graph(&args.graph)?));
    let criteria = parse_criteria(args)?;

    let sink = Arc::new(InMemoryEventSink::new());
    let mut manager = SearchManager::new(graph.clone()).with_event_sink(sink.clone());
    let outcome = manager.find(&criteria, SearchOptions::new(args.action.into()))?;

    let report = SearchReport {
        selected: manager
            .selection()
            .selected_nodes()
            .iter()
            .cloned()
            .collect(),
        filter_active: manager.filter().is_active(),
        visible: manager
            .filter()
            .visible_nodes()
            .map(|set| set.iter().cloned().collect()),
        events: sink.events(),
        outcome,
    };

    match format {
        OutputFormat::Table => print_search_table(&report, &graph.read().expect("lock poisoned")),
        _ => output(report, format).map_err(render_error)?,
    }
    Ok(())
}

fn print_search_table(report: &SearchReport, graph: &NodeGraph) {
    if let Some(query) = &report.outcome.query {
        println!("Query: {query}");
    }
    println!(
        "Action: {} | Matches: {}",
        report.outcome.action, report.outcome.match_count
    );

    if report.outcome.matched.is_empty() {
        if report.outcome.cleared {
            println!("No matches; active {} state cleared.", report.outcome.action);
        }
        return;
    }

    let mut table = create_table(&["ID", "Display", "Attributes"]);
    for id in &report.outcome.matched {
        if let Some(node) = graph.node(id) {
            table.add_row(vec![
                node.id.clone(),
                node.display_value.clone(),
                node.attributes.len().to_string(),
            ]);
        }
    }
    println!("{table}");
}

fn run_nodes(args: &NodesArgs, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let summaries: Vec<NodeSummary> = graph
        .nodes()
        .map(|node| NodeSummary {
            id: node.id.clone(),
            display_value: node.display_value.clone(),
            attributes: node.attributes.len(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            let mut table = create_table(&["ID", "Display", "Attributes"]);
            for summary in &summaries {
                table.add_row(summary.to_row());
            }
            println!("{table}");
        }
        _ => output(summaries, format).map_err(render_error)?,
    }
    Ok(())
}

fn render_error(err: std::io::Error) -> SiftError {
    SiftError::system("io_error", err.to_string(), "cli:output")
}

fn load_graph(path: &str) -> Result<NodeGraph> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        SiftError::user(
            "graph_not_found",
            format!("Cannot read graph document '{path}': {err}"),
            "cli:graph",
        )
        .with_hint("Pass the path to a JSON graph document")
    })?;

    let document: GraphDocument = serde_json::from_str(&raw).map_err(|err| {
        SiftError::user(
            "invalid_graph_document",
            format!("Malformed graph document '{path}': {err}"),
            "cli:graph",
        )
        .with_hint(r#"Expected {"nodes": [...], "edges": [...]}"#)
    })?;

    document
        .into_graph()
        .map_err(|err| SiftError::graph("invalid_graph", err.to_string(), "cli:graph"))
}

fn parse_criteria(args: &SearchArgs) -> Result<Vec<SearchCriterion>> {
    if let Some(raw) = &args.criteria {
        if let Ok(list) = serde_json::from_str::<Vec<SearchCriterion>>(raw) {
            return Ok(list);
        }
        return serde_json::from_str::<SearchCriterion>(raw)
            .map(|criterion| vec![criterion])
            .map_err(|err| {
                SiftError::user(
                    "invalid_criteria",
                    format!("Malformed criteria JSON: {err}"),
                    "cli:search",
                )
                .with_hint(
                    r#"Expected e.g. [{"target_field":"Name","operator":"starts_with","value":"An"}]"#,
                )
            });
    }

    let operator = args.operator.ok_or_else(|| {
        SiftError::user(
            "missing_operator",
            "A single-criterion search needs --operator",
            "cli:search",
        )
        .with_hint("Pass --operator, or supply --criteria as JSON")
    })?;
    let value = args.value.clone().ok_or_else(|| {
        SiftError::user(
            "missing_value",
            "A single-criterion search needs --value",
            "cli:search",
        )
        .with_hint("Pass --value, or supply --criteria as JSON")
    })?;

    Ok(vec![SearchCriterion::targeted(
        args.field.clone().unwrap_or_default(),
        operator.into(),
        value,
        args.case_sensitive,
    )])
}
