//! Three-stage pruning of the co-citation graph.
//!
//! # Overview
//!
//! Raw co-citation graphs are dominated by noise: most pairs co-occur once,
//! and many references hang off the main literature as small satellites.
//! Pruning runs three ordered stages:
//!
//! 1. Drop every edge whose weight is at or below `min_weight`.
//! 2. Drop nodes left without any edge.
//! 3. Keep only the largest connected component.
//!
//! When several components tie for largest, the one whose lexicographically
//! smallest member label sorts first wins, so repeated runs over the same
//! input keep the same component.
//!
//! Each stage logs before/after counts; the caller gets the same counts back
//! in a [`PruneReport`].

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, NodeIndexable};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::build::CocitationGraph;

// ---------------------------------------------------------------------------
// Options and report
// ---------------------------------------------------------------------------

/// Tunable knobs for the pruning pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PruneOptions {
    /// Edges with weight `<= min_weight` are removed in stage 1.
    pub min_weight: u32,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self { min_weight: 1 }
    }
}

/// Node and edge counts at one point in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub nodes: usize,
    pub edges: usize,
}

impl StageCounts {
    fn of(graph: &CocitationGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    }
}

/// Stage-by-stage counts produced by [`prune`].
#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub min_weight: u32,
    pub initial: StageCounts,
    pub after_weak_edges: StageCounts,
    pub after_isolates: StageCounts,
    pub after_giant_component: StageCounts,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the three pruning stages on `graph` in place.
///
/// The graph's `node_map` is rebuilt afterwards, since removing nodes
/// invalidates petgraph indices.
#[instrument(skip(graph), fields(min_weight = options.min_weight))]
pub fn prune(graph: &mut CocitationGraph, options: &PruneOptions) -> PruneReport {
    let initial = StageCounts::of(graph);

    let threshold = f64::from(options.min_weight);
    graph
        .graph
        .retain_edges(|g, e| g.edge_weight(e).is_some_and(|w| *w > threshold));
    let after_weak_edges = StageCounts::of(graph);
    debug!(
        before = initial.edges,
        after = after_weak_edges.edges,
        "dropped weak edges"
    );

    graph
        .graph
        .retain_nodes(|g, n| g.neighbors(n).next().is_some());
    let after_isolates = StageCounts::of(graph);
    debug!(
        before = after_weak_edges.nodes,
        after = after_isolates.nodes,
        "dropped isolated nodes"
    );

    retain_giant_component(graph);
    let after_giant_component = StageCounts::of(graph);
    debug!(
        before = after_isolates.nodes,
        after = after_giant_component.nodes,
        "kept largest component"
    );

    rebuild_node_map(graph);

    PruneReport {
        min_weight: options.min_weight,
        initial,
        after_weak_edges,
        after_isolates,
        after_giant_component,
    }
}

/// Stage 3: remove every node outside the largest connected component.
fn retain_giant_component(graph: &mut CocitationGraph) {
    if graph.graph.node_count() == 0 {
        return;
    }

    let mut sets = UnionFind::new(graph.graph.node_bound());
    for edge in graph.graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    // Group live nodes by component root; track each component's size and
    // its smallest member label for the tie-break.
    let mut components: HashMap<usize, (usize, &str)> = HashMap::new();
    for idx in graph.graph.node_indices() {
        let root = sets.find(idx.index());
        let label = graph.graph[idx].label.as_str();
        components
            .entry(root)
            .and_modify(|(size, min_label)| {
                *size += 1;
                if label < *min_label {
                    *min_label = label;
                }
            })
            .or_insert((1, label));
    }

    let Some((&winner, _)) = components
        .iter()
        .max_by(|(_, (size_a, label_a)), (_, (size_b, label_b))| {
            // Larger size wins; on ties the smaller min-label wins, so it
            // compares as the maximum under reversed label order.
            size_a.cmp(size_b).then(label_b.cmp(label_a))
        })
    else {
        return;
    };

    let keep: Vec<NodeIndex> = graph
        .graph
        .node_indices()
        .filter(|idx| sets.find(idx.index()) == winner)
        .collect();
    let keep: std::collections::HashSet<NodeIndex> = keep.into_iter().collect();

    graph.graph.retain_nodes(|_, n| keep.contains(&n));
}

/// Recompute the label-to-index map after node removals.
fn rebuild_node_map(graph: &mut CocitationGraph) {
    let node_map = graph
        .graph
        .node_indices()
        .map(|idx| (graph.graph[idx].label.clone(), idx))
        .collect();
    graph.node_map = node_map;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
