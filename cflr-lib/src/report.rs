use cfl::grammar::{Alphabet, Symbol};
use cfl::graph::{LabeledGraph, Node};
use cfl::solvers::{ClosureResult, Outcome};
use itertools::Itertools;
use utils::DiagnosticEmitter;

pub fn print_summary(graph: &LabeledGraph<Symbol>, alphabet: &Alphabet, diag: &mut DiagnosticEmitter) {
    diag.out_ln("----------------------------------");
    diag.out_ln("Graph summary:");
    diag.out_ln(&format!("  nodes: {}", graph.active_node_count()));
    diag.out_ln(&format!("  edges: {}", graph.len()));
    diag.out_ln(&format!("  label kinds: {}", graph.label_counts().len()));
    for (name, count) in graph
        .label_counts()
        .iter()
        .map(|(&label, &count)| (alphabet.name(label), count))
        .sorted()
    {
        diag.out_ln(&format!("    {name}: {count}"));
    }
    diag.out_ln("----------------------------------");
}

pub fn print_closure(result: &ClosureResult, diag: &mut DiagnosticEmitter) {
    let stats = result.stats;
    match result.outcome {
        Outcome::Closed => diag.out_ln(&format!(
            "Closure finished: derived {} edges in {} iterations.",
            stats.derived_edges, stats.iterations
        )),
        Outcome::Truncated => diag.warning(&format!(
            "Iteration limit reached after {} iterations with {} derived edges, the result is incomplete.",
            stats.iterations, stats.derived_edges
        )),
    }
}

/// Prints the edges in the same `src dst label` format the edge lists are
/// read from, optionally keeping only the edges with the given label.
pub fn dump_edges(
    graph: &LabeledGraph<Symbol>,
    alphabet: &Alphabet,
    node_names: Option<&[String]>,
    label: Option<Symbol>,
    diag: &mut DiagnosticEmitter,
) {
    let lines = graph
        .edges()
        .iter()
        .filter(|e| label.is_none_or(|l| e.label == l))
        .sorted_by_key(|e| (e.src, e.dst, alphabet.name(e.label)))
        .map(|e| {
            format!(
                "{} {} {}",
                node_name(node_names, e.src),
                node_name(node_names, e.dst),
                alphabet.name(e.label)
            )
        });
    for line in lines {
        diag.out_ln(&line);
    }
}

fn node_name(node_names: Option<&[String]>, node: Node) -> String {
    match node_names.and_then(|names| names.get(node.0)) {
        Some(name) => name.clone(),
        None => node.0.to_string(),
    }
}
