//! Node selection state.
//!
//! Tracks which nodes are highlighted. The search orchestrator drives this
//! through commands; the host reads the queryable state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of currently selected node IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSelection {
    selected: BTreeSet<String>,
}

impl NodeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the given nodes, in addition to any already selected.
    pub fn select<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.selected.extend(ids.into_iter().map(Into::into));
    }

    /// Clears the selection.
    pub fn unselect_all(&mut self) {
        self.selected.clear();
    }

    /// Turns the selection off entirely.
    pub fn turn_off_selection(&mut self) {
        self.selected.clear();
    }

    /// Whether any node is selected.
    #[must_use]
    pub fn are_any_nodes_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Whether more than one node is selected.
    #[must_use]
    pub fn are_multiple_nodes_selected(&self) -> bool {
        self.selected.len() > 1
    }

    /// Returns the selected node IDs in sorted order.
    #[must_use]
    pub fn selected_nodes(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Returns the selected node ID when exactly one node is selected.
    #[must_use]
    pub fn selected_node(&self) -> Option<&str> {
        if self.selected.len() == 1 {
            self.selected.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Checks whether the given node is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_query() {
        let mut selection = NodeSelection::new();
        assert!(!selection.are_any_nodes_selected());
        assert_eq!(selection.selected_node(), None);

        selection.select(["1".to_string()]);
        assert!(selection.are_any_nodes_selected());
        assert!(!selection.are_multiple_nodes_selected());
        assert_eq!(selection.selected_node(), Some("1"));

        selection.select(["3".to_string(), "2".to_string()]);
        assert!(selection.are_multiple_nodes_selected());
        assert_eq!(selection.selected_node(), None);

        let ids: Vec<&str> = selection.selected_nodes().iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn unselect_all_clears() {
        let mut selection = NodeSelection::new();
        selection.select(["1".to_string(), "2".to_string()]);

        selection.unselect_all();
        assert!(!selection.are_any_nodes_selected());
    }

    #[test]
    fn turn_off_clears() {
        let mut selection = NodeSelection::new();
        selection.select(["1".to_string()]);

        selection.turn_off_selection();
        assert!(!selection.is_selected("1"));
    }
}
