//! Core domain types: nodes, criteria, search orchestration, and events.
//!
//! This module contains the heart of graphsift's domain model. A search is
//! a list of criteria compiled into one compound predicate, evaluated over
//! the node set, with the matches driving a selection or filter side
//! effect.
//!
//! # Architecture
//!
//! ```text
//! Criteria → compound predicate → matches → selection / filter
//!                                        ↘ lifecycle events
//! ```
//!
//! # Key Concepts
//!
//! ## Criteria
//!
//! A [`SearchCriterion`](criterion::SearchCriterion) is one atomic test:
//! target field, operator, comparison value, case rule. It is immutable and
//! compiles itself into a predicate over a single node. A criterion with no
//! target field is a wildcard scan over every attribute value.
//!
//! ## Compound query
//!
//! The orchestrator ANDs every criterion's predicate together, in list
//! order. There is no OR-grouping; one search is one conjunction.
//!
//! ## Side effects
//!
//! Matches are handed to the [`NodeSelection`](selection::NodeSelection) or
//! [`NodeFilter`](filter::NodeFilter) collaborator per the requested
//! [`SearchAction`](search::SearchAction). An empty criteria list, or a
//! query with no matches, clears the corresponding state instead.
//!
//! ## Events
//!
//! Every executed search publishes `SearchStarted` and `SearchCompleted`
//! through an [`EventSink`](events::EventSink), synchronously on the
//! calling thread.
//!
//! # Modules
//!
//! - [`node`] - Node model and graph store
//! - [`criterion`] - Search criteria and predicate compilation
//! - [`search`] - `SearchManager`: query execution and side effects
//! - [`selection`] - Selection collaborator
//! - [`filter`] - Visibility-filter collaborator
//! - [`events`] - Lifecycle events and sinks
//! - [`error`] - Structured error types

pub mod criterion;
pub mod error;
pub mod events;
pub mod filter;
pub mod node;
pub mod search;
pub mod selection;
