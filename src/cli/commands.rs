//! CLI command definitions.
//!
//! All features are accessible via CLI. The UI is a projection, not a controller.

use super::output::OutputFormat;
use crate::core::criterion::SearchOperator;
use crate::core::search::SearchAction;
use clap::{Args, Parser, Subcommand};

/// Side effect applied to matched nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ActionArg {
    Select,
    Filter,
}

impl From<ActionArg> for SearchAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Select => Self::Select,
            ActionArg::Filter => Self::Filter,
        }
    }
}

/// Comparison operator for a single-criterion search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OperatorArg {
    Equals,
    DoesNotEqual,
    Contains,
    DoesNotContain,
    StartsWith,
    DoesNotStartWith,
    EndsWith,
    DoesNotEndWith,
}

impl From<OperatorArg> for SearchOperator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Equals => Self::Equals,
            OperatorArg::DoesNotEqual => Self::DoesNotEqual,
            OperatorArg::Contains => Self::Contains,
            OperatorArg::DoesNotContain => Self::DoesNotContain,
            OperatorArg::StartsWith => Self::StartsWith,
            OperatorArg::DoesNotStartWith => Self::DoesNotStartWith,
            OperatorArg::EndsWith => Self::EndsWith,
            OperatorArg::DoesNotEndWith => Self::DoesNotEndWith,
        }
    }
}

/// Graphsift CLI - attribute search and filtering for graph node sets.
#[derive(Parser)]
#[command(name = "graphsift")]
#[command(
    version,
    about,
    long_about = "Attribute search and filtering over JSON graph documents."
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Run a search against a graph document
    Search(SearchArgs),

    /// List the nodes of a graph document
    Nodes(NodesArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Path to the graph document (JSON)
    pub graph: String,

    /// Side effect applied to matches
    #[arg(long, value_enum, default_value = "select")]
    pub action: ActionArg,

    /// Criteria as JSON (an array of criteria, or a single criterion object)
    #[arg(long, conflicts_with_all = ["field", "operator", "value"])]
    pub criteria: Option<String>,

    /// Target attribute for a single criterion; omit to scan every attribute
    #[arg(long)]
    pub field: Option<String>,

    /// Operator for a single criterion
    #[arg(long, value_enum)]
    pub operator: Option<OperatorArg>,

    /// Comparison value for a single criterion
    #[arg(long)]
    pub value: Option<String>,

    /// Compare case-sensitively
    #[arg(long, default_value_t = false)]
    pub case_sensitive: bool,
}

#[derive(Args)]
pub struct NodesArgs {
    /// Path to the graph document (JSON)
    pub graph: String,
}
