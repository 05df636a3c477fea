//! Undirected station adjacency graph.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::station::{AdjacencySnapshot, StationId};

/// Serialized form: station id → sorted neighbor list.
pub type AdjacencyLists = BTreeMap<StationId, Vec<StationId>>;

/// Undirected, deduplicated adjacency between stations.
///
/// Invariants:
/// - Symmetric: `b ∈ adj[a]` iff `a ∈ adj[b]`; no self-loops.
/// - Every endpoint of an edge is a node; isolated nodes are allowed.
/// - Node, neighbor, and edge iteration follow `StationId` order; edges come
///   out as `(min, max)` pairs in lexicographic order. The unweighted spanning
///   tree depends on exactly this order.
/// - Built once; derived computations construct new graphs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AdjacencyLists", into = "AdjacencyLists")]
pub struct AdjacencyGraph {
    adj: BTreeMap<StationId, BTreeSet<StationId>>,
}

impl AdjacencyGraph {
    /// Graph from explicit nodes and undirected edges. Edge endpoints are added
    /// as nodes; duplicates and self-loops are dropped.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = StationId>,
        E: IntoIterator<Item = (StationId, StationId)>,
    {
        let mut g = AdjacencyGraph::default();
        for id in nodes {
            g.insert_node(id);
        }
        for (a, b) in edges {
            g.insert_edge(a, b);
        }
        g
    }

    /// Graph from a precomputed adjacency snapshot (alternate input path).
    pub fn from_adjacency_lists(lists: &AdjacencyLists) -> Self {
        let mut g = AdjacencyGraph::default();
        for (station, neighbors) in lists {
            g.insert_node(station.clone());
            for n in neighbors {
                g.insert_edge(station.clone(), n.clone());
            }
        }
        g
    }

    pub fn from_snapshot(snapshot: &AdjacencySnapshot) -> Self {
        Self::from_adjacency_lists(&snapshot.lists)
    }

    pub(crate) fn insert_node(&mut self, id: StationId) {
        self.adj.entry(id).or_default();
    }

    /// Insert `{a, b}`; returns false for self-loops and already-present pairs.
    pub(crate) fn insert_edge(&mut self, a: StationId, b: StationId) -> bool {
        if a == b {
            self.insert_node(a);
            return false;
        }
        let fresh = self.adj.entry(a.clone()).or_default().insert(b.clone());
        self.adj.entry(b).or_default().insert(a);
        fresh
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StationId> + '_ {
        self.adj.keys()
    }

    #[inline]
    pub fn contains_node(&self, id: &StationId) -> bool {
        self.adj.contains_key(id)
    }

    pub fn contains_edge(&self, a: &StationId, b: &StationId) -> bool {
        self.adj.get(a).is_some_and(|ns| ns.contains(b))
    }

    /// Sorted neighbors of `id` (empty for unknown stations).
    pub fn neighbors<'a>(&'a self, id: &StationId) -> impl Iterator<Item = &'a StationId> + 'a {
        self.adj.get(id).into_iter().flat_map(|ns| ns.iter())
    }

    /// Number of distinct neighbors; `None` if `id` is not a node.
    pub fn degree(&self, id: &StationId) -> Option<usize> {
        self.adj.get(id).map(BTreeSet::len)
    }

    /// Nodes with their degree, in id order.
    pub fn degrees(&self) -> impl Iterator<Item = (&StationId, usize)> + '_ {
        self.adj.iter().map(|(id, ns)| (id, ns.len()))
    }

    /// Canonical edge sequence: `(min, max)` pairs, lexicographically sorted.
    pub fn edges(&self) -> impl Iterator<Item = (&StationId, &StationId)> + '_ {
        self.adj
            .iter()
            .flat_map(|(a, ns)| {
                ns.range::<StationId, _>((Bound::Excluded(a), Bound::Unbounded))
                    .map(move |b| (a, b))
            })
    }

    /// Adjacency-list artifact (sorted lists, deterministic output).
    pub fn to_adjacency_lists(&self) -> AdjacencyLists {
        self.adj
            .iter()
            .map(|(id, ns)| (id.clone(), ns.iter().cloned().collect()))
            .collect()
    }

    /// Number of connected components (isolated nodes count as components).
    pub fn connected_components(&self) -> usize {
        let mut seen: BTreeSet<&StationId> = BTreeSet::new();
        let mut components = 0;
        for start in self.adj.keys() {
            if !seen.insert(start) {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            while let Some(cur) = stack.pop() {
                for n in self.neighbors(cur) {
                    if seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
        }
        components
    }
}

impl From<AdjacencyLists> for AdjacencyGraph {
    fn from(lists: AdjacencyLists) -> Self {
        AdjacencyGraph::from_adjacency_lists(&lists)
    }
}

impl From<AdjacencyGraph> for AdjacencyLists {
    fn from(g: AdjacencyGraph) -> Self {
        g.to_adjacency_lists()
    }
}
