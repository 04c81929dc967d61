//! CLI commands and argument parsing.
//!
//! This module provides the command-line interface for graphsift, built on
//! [`clap`](https://docs.rs/clap). Searches run against a graph document
//! loaded from JSON.
//!
//! # Commands
//!
//! - **Search**: `search` runs one compound query and applies a select or
//!   filter action
//! - **Node inspection**: `nodes` lists the nodes of a graph document
//! - **Version info**: `version`
//!
//! # Output Formats
//!
//! Commands support multiple output formats via the `-f`/`--format` flag:
//!
//! - `table` - Human-readable table format (default)
//! - `json` - Machine-readable JSON
//! - `yaml` - YAML
//!
//! # Example
//!
//! ```bash,no_run
//! # Select every node whose Name starts with "An"
//! graphsift search graph.json --action select \
//!     --field Name --operator starts-with --value An
//!
//! # Same search as JSON output
//! graphsift search graph.json --action select \
//!     --field Name --operator starts-with --value An -f json
//! ```
//!
//! # Modules
//!
//! - [`commands`] - Command definitions
//! - [`output`] - Output formatting and table rendering

pub mod commands;
pub mod output;
