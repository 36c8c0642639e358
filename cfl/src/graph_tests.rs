use super::error::CflError;
use super::graph::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Sym {
    A,
    B,
    S,
}

use Sym::*;

fn node_set(nodes: &[usize]) -> rustc_hash::FxHashSet<Node> {
    nodes.iter().map(|&n| Node(n)).collect()
}

#[test]
fn add_and_query_edges() {
    let mut graph = LabeledGraph::new(4);
    assert!(graph.is_empty());

    assert_eq!(graph.add_edge(Node(1), Node(2), A), Ok(true));
    assert_eq!(graph.add_edge(Node(1), Node(3), A), Ok(true));
    assert_eq!(graph.add_edge(Node(1), Node(2), B), Ok(true));
    assert_eq!(graph.add_edge(Node(0), Node(2), A), Ok(true));

    assert!(graph.has_edge(Node(1), Node(2), A));
    assert!(graph.has_edge(Node(1), Node(2), B));
    assert!(!graph.has_edge(Node(2), Node(1), A));
    assert!(!graph.has_edge(Node(1), Node(2), S));
    assert_eq!(graph.len(), 4);

    let succs = graph.successors_by_label(Node(1));
    assert_eq!(succs.len(), 2);
    assert_eq!(succs[&A], node_set(&[2, 3]));
    assert_eq!(succs[&B], node_set(&[2]));

    let preds = graph.predecessors_by_label(Node(2));
    assert_eq!(preds[&A], node_set(&[0, 1]));
    assert_eq!(preds[&B], node_set(&[1]));

    // Nodes without edges, and nodes outside of the domain.
    assert!(graph.successors_by_label(Node(3)).is_empty());
    assert!(graph.predecessors_by_label(Node(0)).is_empty());
    assert!(graph.successors_by_label(Node(42)).is_empty());
}

#[test]
fn duplicate_edges_are_ignored() {
    let mut graph = LabeledGraph::new(3);
    assert_eq!(graph.add_edge(Node(0), Node(1), A), Ok(true));
    assert_eq!(graph.add_edge(Node(0), Node(1), A), Ok(false));
    assert_eq!(graph.insert(Edge::new(0, 1, A)), Ok(false));

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.edges(), &[Edge::new(0, 1, A)]);
    assert_eq!(graph.successors_by_label(Node(0))[&A].len(), 1);
    assert_eq!(graph.label_counts()[&A], 1);
}

#[test]
fn enumeration_and_statistics() {
    let graph = LabeledGraph::from_edges(
        10,
        [
            Edge::new(3, 4, A),
            Edge::new(4, 5, B),
            Edge::new(3, 5, A),
            Edge::new(3, 4, A),
        ],
    )
    .unwrap();

    assert_eq!(
        graph.edges(),
        &[Edge::new(3, 4, A), Edge::new(4, 5, B), Edge::new(3, 5, A)]
    );
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.active_node_count(), 3);
    assert_eq!(graph.label_counts().len(), 2);
    assert_eq!(graph.label_counts()[&A], 2);
    assert_eq!(graph.edges_with_label(B).count(), 1);
    assert!(graph.contains(&Edge::new(4, 5, B)));
    assert_eq!(graph.edge_set().len(), 3);
}

#[test]
fn invalid_edges() {
    let mut graph = LabeledGraph::new(2);
    let err = graph.add_edge(Node(0), Node(2), A).unwrap_err();
    assert_eq!(
        err,
        CflError::InvalidEdge {
            src: 0,
            dst: 2,
            label: "A".to_owned(),
            reason: "node 2 is outside of the domain 0..2".to_owned(),
        }
    );
    assert!(graph.is_empty());

    graph.restrict_labels([A, B]);
    assert_eq!(graph.add_edge(Node(0), Node(1), B), Ok(true));
    let err = graph.add_edge(Node(0), Node(1), S).unwrap_err();
    assert!(matches!(err, CflError::InvalidEdge { .. }));
    assert_eq!(
        err.to_string(),
        "invalid edge 0 -S-> 1: label is not part of the alphabet"
    );
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.active_node_count(), 2);
}
