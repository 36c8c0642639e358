use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::CflError;
use crate::grammar::Label;

/// Opaque node identifier supplied by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<L> {
    pub src: Node,
    pub dst: Node,
    pub label: L,
}

impl<L> Edge<L> {
    pub fn new(src: usize, dst: usize, label: L) -> Self {
        Self {
            src: Node(src),
            dst: Node(dst),
            label,
        }
    }
}

/// Neighbours of a node grouped by the label of the connecting edge.
pub type LabelMap<L> = FxHashMap<L, FxHashSet<Node>>;

/// A set of labeled edges over the nodes `0..node_count`. Edges can only be
/// added, never removed. Every insertion updates the edge set and both
/// adjacency indices together, so the three views always agree.
#[derive(Debug, Clone)]
pub struct LabeledGraph<L: Label> {
    node_count: usize,
    label_domain: Option<FxHashSet<L>>,
    edge_set: FxHashSet<Edge<L>>,
    // Insertion order, used for enumeration.
    edges: Vec<Edge<L>>,
    successors: Vec<LabelMap<L>>,
    predecessors: Vec<LabelMap<L>>,
    active_nodes: FixedBitSet,
    label_counts: FxHashMap<L, usize>,
    no_neighbours: LabelMap<L>,
}

impl<L: Label> LabeledGraph<L> {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            label_domain: None,
            edge_set: FxHashSet::default(),
            edges: Vec::new(),
            successors: vec![LabelMap::default(); node_count],
            predecessors: vec![LabelMap::default(); node_count],
            active_nodes: FixedBitSet::with_capacity(node_count),
            label_counts: FxHashMap::default(),
            no_neighbours: LabelMap::default(),
        }
    }

    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = Edge<L>>,
    ) -> Result<Self, CflError> {
        let mut graph = Self::new(node_count);
        for edge in edges {
            graph.insert(edge)?;
        }
        Ok(graph)
    }

    /// Only accept edges carrying one of the given labels from now on.
    pub fn restrict_labels(&mut self, labels: impl IntoIterator<Item = L>) -> &mut Self {
        self.label_domain = Some(labels.into_iter().collect());
        self
    }

    /// Adds the edge unless it is already present. Returns true if the edge is
    /// new. This is the only place where edges are deduplicated.
    pub fn add_edge(&mut self, src: Node, dst: Node, label: L) -> Result<bool, CflError> {
        self.validate(src, dst, label)?;

        let edge = Edge { src, dst, label };
        if !self.edge_set.insert(edge) {
            return Ok(false);
        }
        self.edges.push(edge);
        self.successors[src.0]
            .entry(label)
            .or_default()
            .insert(dst);
        self.predecessors[dst.0]
            .entry(label)
            .or_default()
            .insert(src);
        self.active_nodes.insert(src.0);
        self.active_nodes.insert(dst.0);
        *self.label_counts.entry(label).or_default() += 1;
        Ok(true)
    }

    pub fn insert(&mut self, edge: Edge<L>) -> Result<bool, CflError> {
        self.add_edge(edge.src, edge.dst, edge.label)
    }

    pub fn has_edge(&self, src: Node, dst: Node, label: L) -> bool {
        self.edge_set.contains(&Edge { src, dst, label })
    }

    pub fn contains(&self, edge: &Edge<L>) -> bool {
        self.edge_set.contains(edge)
    }

    /// Outgoing edges of `node` grouped by label. Empty for nodes without
    /// outgoing edges.
    pub fn successors_by_label(&self, node: Node) -> &LabelMap<L> {
        self.successors.get(node.0).unwrap_or(&self.no_neighbours)
    }

    /// Incoming edges of `node` grouped by label. Empty for nodes without
    /// incoming edges.
    pub fn predecessors_by_label(&self, node: Node) -> &LabelMap<L> {
        self.predecessors.get(node.0).unwrap_or(&self.no_neighbours)
    }

    /// All edges in the order they were added.
    pub fn edges(&self) -> &[Edge<L>] {
        &self.edges
    }

    pub fn edge_set(&self) -> &FxHashSet<Edge<L>> {
        &self.edge_set
    }

    pub fn edges_with_label(&self, label: L) -> impl Iterator<Item = &Edge<L>> + '_ {
        self.edges.iter().filter(move |e| e.label == label)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of nodes with at least one incoming or outgoing edge.
    pub fn active_node_count(&self) -> usize {
        self.active_nodes.count_ones(..)
    }

    pub fn label_counts(&self) -> &FxHashMap<L, usize> {
        &self.label_counts
    }

    fn validate(&self, src: Node, dst: Node, label: L) -> Result<(), CflError> {
        let invalid = |reason: String| CflError::InvalidEdge {
            src: src.0,
            dst: dst.0,
            label: format!("{label:?}"),
            reason,
        };
        for node in [src, dst] {
            if node.0 >= self.node_count {
                return Err(invalid(format!(
                    "node {} is outside of the domain 0..{}",
                    node.0, self.node_count
                )));
            }
        }
        if let Some(domain) = &self.label_domain {
            if !domain.contains(&label) {
                return Err(invalid("label is not part of the alphabet".to_owned()));
            }
        }
        Ok(())
    }
}
