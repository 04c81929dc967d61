//! Node model and graph store.
//!
//! A node carries a display value and named string attributes. The search
//! core only reads nodes; mutation belongs to the host application.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A graph node with a display value and named attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node ID within a graph.
    pub id: String,
    /// The label shown for the node.
    pub display_value: String,
    /// Named attribute values.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    /// Creates a new node. The display value defaults to the ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_value: id.clone(),
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the display value.
    #[must_use]
    pub fn with_display_value(mut self, display_value: impl Into<String>) -> Self {
        self.display_value = display_value.into();
        self
    }

    /// Adds a named attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Checks whether the node has an attribute with the given name.
    #[must_use]
    pub fn contains_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate node ID: {0}")]
    DuplicateNode(String),
    #[error("Edge endpoint does not exist: {0}")]
    UnknownEndpoint(String),
}

/// A node/edge store with deterministic iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: BTreeMap<String, Node>,
    edges: Vec<Edge>,
}

impl NodeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph.
    ///
    /// # Errors
    /// Returns an error if a node with the same ID already exists.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    /// Returns an error if either endpoint does not exist.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> Result<(), GraphError> {
        let source = source.into();
        let target = target.into();
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::UnknownEndpoint(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::UnknownEndpoint(target));
        }
        self.edges.push(Edge { source, target });
        Ok(())
    }

    /// Returns the node with the given ID.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterates over nodes in ID order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Flat graph document, the interchange form the CLI loads from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    /// Builds a validated graph from the document.
    ///
    /// # Errors
    /// Returns an error on duplicate node IDs or dangling edge endpoints.
    pub fn into_graph(self) -> Result<NodeGraph, GraphError> {
        let mut graph = NodeGraph::new();
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for edge in self.edges {
            graph.add_edge(edge.source, edge.target)?;
        }
        Ok(graph)
    }
}

impl From<&NodeGraph> for GraphDocument {
    fn from(graph: &NodeGraph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().to_vec(),
        }
    }
}
