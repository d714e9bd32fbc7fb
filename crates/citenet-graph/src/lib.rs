#![forbid(unsafe_code)]
//! Co-citation graph layer for citenet.
//!
//! Takes the records produced by `citenet-core`, aggregates them into an
//! undirected co-citation graph, prunes it down to its strongly co-cited
//! core, and serializes the result as GraphML.

pub mod build;
pub mod graphml;
pub mod prune;

pub use build::{CocitationGraph, NodeAttrs};
pub use graphml::write_graphml;
pub use prune::{prune, PruneOptions, PruneReport, StageCounts};
