//! Search orchestration.
//!
//! `SearchManager` combines a list of criteria into one compound predicate,
//! runs it over the current node set, and drives the selection or filter
//! side effect, publishing lifecycle events along the way.

use crate::core::criterion::{NodePredicate, SearchCriterion};
use crate::core::error::Result;
use crate::core::events::{
    EventSink, InMemoryEventSink, SearchEvent, SearchEventPayload, SharedEventSink,
};
use crate::core::filter::NodeFilter;
use crate::core::node::NodeGraph;
use crate::core::selection::NodeSelection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Side effect applied to the matched nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAction {
    /// No side effect requested.
    #[default]
    Unknown,
    /// Highlight the matched nodes.
    Select,
    /// Show only the matched nodes.
    Filter,
}

impl std::fmt::Display for SearchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Select => write!(f, "select"),
            Self::Filter => write!(f, "filter"),
        }
    }
}

/// Options governing a search invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// The side effect applied to matches.
    #[serde(default)]
    pub action: SearchAction,
}

impl SearchOptions {
    /// Creates options with the given action.
    #[must_use]
    pub fn new(action: SearchAction) -> Self {
        Self { action }
    }

    /// Options for a selection search.
    #[must_use]
    pub fn select() -> Self {
        Self::new(SearchAction::Select)
    }

    /// Options for a filter search.
    #[must_use]
    pub fn filter() -> Self {
        Self::new(SearchAction::Filter)
    }
}

/// Result summary of one search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Human-readable description of the compound query, when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// The requested side effect.
    pub action: SearchAction,
    /// Number of nodes that matched.
    pub match_count: usize,
    /// IDs of the matched nodes, in node-set iteration order.
    pub matched: Vec<String>,
    /// Whether the invocation cleared the active selection/filter instead
    /// of producing matches.
    pub cleared: bool,
}

impl SearchOutcome {
    fn noop(action: SearchAction) -> Self {
        Self {
            query: None,
            action,
            match_count: 0,
            matched: Vec::new(),
            cleared: false,
        }
    }

    fn cleared(action: SearchAction) -> Self {
        Self {
            query: None,
            action,
            match_count: 0,
            matched: Vec::new(),
            cleared: true,
        }
    }
}

/// Shared handle to the externally-owned node graph.
pub type SharedGraph = Arc<RwLock<NodeGraph>>;

/// Orchestrates compilation, execution, and side effects for searches.
///
/// The manager reads the shared node graph, owns the selection and filter
/// collaborators, and publishes lifecycle events through the injected sink.
/// Construct one explicitly and pass it to callers; a host wanting a single
/// process-wide instance wraps it in a `OnceLock` at its own edge.
pub struct SearchManager {
    graph: SharedGraph,
    selection: NodeSelection,
    filter: NodeFilter,
    sink: SharedEventSink,
    search_running: bool,
}

impl SearchManager {
    /// Creates a manager over the given node graph.
    #[must_use]
    pub fn new(graph: SharedGraph) -> Self {
        Self {
            graph,
            selection: NodeSelection::new(),
            filter: NodeFilter::new(),
            sink: Arc::new(InMemoryEventSink::new()),
            search_running: false,
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: SharedEventSink) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the selection state.
    #[must_use]
    pub fn selection(&self) -> &NodeSelection {
        &self.selection
    }

    /// Returns the filter state.
    #[must_use]
    pub fn filter(&self) -> &NodeFilter {
        &self.filter
    }

    /// Whether a search is currently evaluating.
    #[must_use]
    pub fn is_search_running(&self) -> bool {
        self.search_running
    }

    /// Runs a compound search and applies the requested side effect.
    ///
    /// An empty criteria list is the clear-search signal: the active
    /// selection or filter (per the action) is turned off and no query
    /// runs. An empty node set short-circuits before anything else. A query
    /// that matches nothing also clears, rather than leaving prior state.
    ///
    /// # Errors
    /// Returns an error if any criterion fails to compile; no events fire
    /// in that case.
    pub fn find(
        &mut self,
        criteria: &[SearchCriterion],
        options: SearchOptions,
    ) -> Result<SearchOutcome> {
        if self.graph.read().expect("lock poisoned").is_empty() {
            return Ok(SearchOutcome::noop(options.action));
        }

        if criteria.is_empty() {
            match options.action {
                SearchAction::Select => self.selection.turn_off_selection(),
                SearchAction::Filter => self.filter.turn_off_filter(),
                SearchAction::Unknown => {}
            }
            return Ok(SearchOutcome::cleared(options.action));
        }

        // Only one filter may be active at a time; a new filter search
        // always restarts from an unfiltered state.
        if options.action == SearchAction::Filter && self.filter.is_active() {
            self.filter.turn_off_filter();
        }

        let mut predicates: Vec<NodePredicate> = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            predicates.push(criterion.compile()?);
        }
        let query = describe_query(criteria);

        self.search_running = true;
        self.sink.publish(SearchEvent::new(SearchEventPayload::SearchStarted {
            query: query.clone(),
            action: options.action,
        }));

        let matched: Vec<String> = {
            let graph = self.graph.read().expect("lock poisoned");
            graph
                .nodes()
                .filter(|node| predicates.iter().all(|predicate| predicate(node)))
                .map(|node| node.id.clone())
                .collect()
        };

        if matched.is_empty() {
            match options.action {
                SearchAction::Select => self.selection.turn_off_selection(),
                SearchAction::Filter => self.filter.turn_off_filter(),
                SearchAction::Unknown => {}
            }
        } else {
            match options.action {
                SearchAction::Select => {
                    self.selection.unselect_all();
                    self.selection.select(matched.iter().cloned());
                }
                SearchAction::Filter => self.filter.filter(matched.iter().cloned()),
                SearchAction::Unknown => {}
            }
        }

        self.sink.publish(SearchEvent::new(SearchEventPayload::SearchCompleted {
            query: query.clone(),
            action: options.action,
            match_count: matched.len(),
        }));
        self.search_running = false;

        Ok(SearchOutcome {
            query: Some(query),
            action: options.action,
            cleared: matched.is_empty(),
            match_count: matched.len(),
            matched,
        })
    }
}

/// Renders the compound query as a human-readable conjunction.
#[must_use]
pub fn describe_query(criteria: &[SearchCriterion]) -> String {
    criteria
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" AND ")
}
