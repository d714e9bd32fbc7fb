//! Co-citation graph construction from parsed publication records.
//!
//! # Overview
//!
//! Two cited references are *co-cited* when the same publication lists both
//! in its `CR` field. This module walks every parsed [`Record`], normalizes
//! each raw reference string to a canonical identity, and builds an
//! undirected [`petgraph`] graph where:
//!
//! - nodes are canonical reference identities (`"AUTHOR, YEAR, SOURCE"`),
//! - an edge between two identities carries the number of publications in
//!   which the pair appeared together, stored as `f64` for GraphML.
//!
//! ## Counting
//!
//! Reference lists are taken as exported: a reference that appears twice in
//! one publication counts twice toward its node frequency and toward every
//! pair it forms. Pairs of a reference with itself are never edges.
//!
//! ## Determinism
//!
//! Nodes are inserted in first-seen order and pair tallies live in a
//! `BTreeMap` keyed by the sorted identity pair, so the same input always
//! produces the same node and edge ordering.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashMap};

use citenet_core::normalize::{identity_year, normalize_cited_ref};
use citenet_core::Record;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// NodeAttrs
// ---------------------------------------------------------------------------

/// Attributes carried by each graph node, mirrored into GraphML on export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttrs {
    /// Canonical reference identity, also the GraphML node id.
    pub label: String,
    /// Number of times this reference appeared across all `CR` lists.
    pub freq: u32,
    /// Publication year lifted from the identity, when it parses as one.
    pub year: Option<String>,
}

// ---------------------------------------------------------------------------
// CocitationGraph
// ---------------------------------------------------------------------------

/// An undirected co-citation graph over canonical reference identities.
#[derive(Debug)]
pub struct CocitationGraph {
    /// Undirected graph: nodes = cited references, edge weight = co-citation count.
    pub graph: UnGraph<NodeAttrs, f64>,
    /// Mapping from canonical identity to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl CocitationGraph {
    /// Build a [`CocitationGraph`] from parsed publication records.
    ///
    /// References that fail normalization (no author token) are dropped
    /// before counting. Records whose accepted reference list is shorter
    /// than two still contribute node frequencies, just no edges.
    #[must_use]
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[Record]) -> Self {
        let mut freqs: HashMap<String, u32> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        let mut links: BTreeMap<(String, String), u64> = BTreeMap::new();

        for record in records {
            let identities: Vec<String> = record
                .cited_refs()
                .iter()
                .filter_map(|raw| normalize_cited_ref(raw))
                .collect();

            for identity in &identities {
                let count = freqs.entry(identity.clone()).or_insert_with(|| {
                    order.push(identity.clone());
                    0
                });
                *count += 1;
            }

            for (i, a) in identities.iter().enumerate() {
                for b in &identities[i + 1..] {
                    if a == b {
                        continue;
                    }
                    *links.entry(pair_key(a, b)).or_insert(0) += 1;
                }
            }
        }

        let mut graph = UnGraph::<NodeAttrs, f64>::default();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(order.len());

        for label in order {
            let freq = freqs.get(&label).copied().unwrap_or(0);
            let year = identity_year(&label).map(str::to_owned);
            let idx = graph.add_node(NodeAttrs {
                label: label.clone(),
                freq,
                year,
            });
            node_map.insert(label, idx);
        }

        for ((a, b), count) in links {
            // Both endpoints were tallied above, so the lookups cannot miss.
            let (Some(&ia), Some(&ib)) = (node_map.get(&a), node_map.get(&b)) else {
                continue;
            };
            #[allow(clippy::cast_precision_loss)]
            graph.add_edge(ia, ib, count as f64);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built co-citation graph"
        );

        Self { graph, node_map }
    }

    /// Return the number of distinct cited references.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of co-citation pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a canonical identity.
    #[must_use]
    pub fn node_index(&self, identity: &str) -> Option<NodeIndex> {
        self.node_map.get(identity).copied()
    }

    /// Return the attributes for a node.
    #[must_use]
    pub fn attrs(&self, idx: NodeIndex) -> Option<&NodeAttrs> {
        self.graph.node_weight(idx)
    }

    /// Return the co-citation count between two identities, if the edge exists.
    #[must_use]
    pub fn weight_between(&self, a: &str, b: &str) -> Option<f64> {
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge).copied()
    }
}

/// Canonical unordered pair key: the two identities in sorted order.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
