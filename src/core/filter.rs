//! Node visibility filter state.
//!
//! At most one filter is active at a time. While active, only the filtered
//! node set is visible; while inactive, every node is visible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Show-only visibility filter over node IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFilter {
    visible: Option<BTreeSet<String>>,
}

impl NodeFilter {
    /// Creates an inactive filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a filter is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.visible.is_some()
    }

    /// Activates the filter so only the given nodes are shown.
    pub fn filter<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.visible = Some(ids.into_iter().map(Into::into).collect());
    }

    /// Deactivates the filter; every node becomes visible again.
    pub fn turn_off_filter(&mut self) {
        self.visible = None;
    }

    /// Checks whether the given node is visible under the current filter.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.as_ref().map_or(true, |set| set.contains(id))
    }

    /// Returns the visible node set while the filter is active.
    #[must_use]
    pub fn visible_nodes(&self) -> Option<&BTreeSet<String>> {
        self.visible.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_filter_shows_everything() {
        let filter = NodeFilter::new();
        assert!(!filter.is_active());
        assert!(filter.is_visible("any"));
        assert_eq!(filter.visible_nodes(), None);
    }

    #[test]
    fn active_filter_shows_only_filtered_nodes() {
        let mut filter = NodeFilter::new();
        filter.filter(["1".to_string(), "3".to_string()]);

        assert!(filter.is_active());
        assert!(filter.is_visible("1"));
        assert!(!filter.is_visible("2"));
        assert!(filter.is_visible("3"));
    }

    #[test]
    fn turn_off_restores_visibility() {
        let mut filter = NodeFilter::new();
        filter.filter(["1".to_string()]);
        filter.turn_off_filter();

        assert!(!filter.is_active());
        assert!(filter.is_visible("2"));
    }
}
