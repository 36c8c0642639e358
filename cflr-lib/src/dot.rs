use cfl::graph::Edge;
use cfl::grammar::Alphabet;
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashMap;
use utils::DiagnosticEmitter;

use crate::parser::EdgeList;

lazy_static! {
    // Edges as emitted by SVF's graph dumps: `Node0x1 -> Node0x2[color=red]`.
    static ref DOT_EDGE: Regex =
        Regex::new(r"(Node0x[0-9a-fA-F]+)\s*->\s*(Node0x[0-9a-fA-F]+)\[color=(\w+)\]")
            .expect("Invalid DOT edge pattern.");
}

/// Dense numbering of DOT node names in order of first appearance.
#[derive(Debug, Clone, Default)]
struct NodeTable {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl NodeTable {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), self.names.len() - 1);
        self.names.len() - 1
    }

    fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Extracts the colored edges from a graphviz file. The color of an edge
/// becomes its label. Nodes are numbered in order of first appearance and
/// every line contributes at most one edge, all other lines are ignored.
/// Returns `None` after reporting an error.
pub fn import_dot(
    source: &str,
    mut alphabet: Alphabet,
    diag: &mut DiagnosticEmitter,
) -> Option<EdgeList> {
    let mut nodes = NodeTable::default();
    let mut edges = Vec::new();
    for (line_num, line) in (1..).zip(source.lines()) {
        let Some(caps) = DOT_EDGE.captures(line) else {
            continue;
        };
        let src = nodes.intern(&caps[1]);
        let dst = nodes.intern(&caps[2]);
        let label = match alphabet.intern(&caps[3]) {
            Ok(label) => label,
            Err(err) => {
                diag.error(line_num, &format!("Too many distinct labels, {err}."));
                return None;
            }
        };
        edges.push(Edge::new(src, dst, label));
    }

    if edges.is_empty() {
        diag.warning("No colored edges found in the DOT input.");
    }

    let node_names = nodes.into_names();
    Some(EdgeList {
        edges,
        node_count: node_names.len(),
        node_names: Some(node_names),
        alphabet,
    })
}
