use cfl::grammar::Alphabet;
use cfl::graph::Edge;
use utils::DiagnosticEmitter;

use super::dot::import_dot;

#[test]
fn import_colored_edges() {
    let source = r#"digraph "PAG" {
	label="PAG";
	Node0x1a [shape=record,label="{ValVar ID: 1}"];
	Node0x1a -> Node0x2b[color=green];
	Node0x2b -> Node0x3C[color=black];
	Node0x3C -> Node0x1a [color=green];
	Node0x1a -> Node0x3C[color=green,style=dashed];
	Node0x2b ->Node0x1a[color=green];
}
"#;
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let list = import_dot(source, Alphabet::new(), &mut diag).unwrap();

    let green = list.alphabet.lookup("green").unwrap();
    let black = list.alphabet.lookup("black").unwrap();
    assert_eq!(
        list.node_names,
        Some(vec!["Node0x1a".to_owned(), "Node0x2b".to_owned(), "Node0x3C".to_owned()])
    );
    assert_eq!(list.node_count, 3);
    assert_eq!(
        list.edges,
        vec![
            Edge::new(0, 1, green),
            Edge::new(1, 2, black),
            Edge::new(1, 0, green),
        ]
    );
    assert_eq!(diag.err_buffer().unwrap(), "");
}

#[test]
fn import_without_edges() {
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let list = import_dot("digraph G {\n  a -> b;\n}\n", Alphabet::new(), &mut diag).unwrap();
    assert!(list.edges.is_empty());
    assert_eq!(list.node_count, 0);
    assert_eq!(
        diag.err_buffer().unwrap(),
        "Warning: No colored edges found in the DOT input.\n"
    );
}

#[test]
fn import_with_full_alphabet() {
    let mut alphabet = Alphabet::new();
    for i in 0..Alphabet::CAPACITY {
        alphabet.intern(&format!("c{i}")).unwrap();
    }
    let source = "Node0x1 -> Node0x2[color=c3];\nNode0x2 -> Node0x1[color=red];\n";
    let mut diag = DiagnosticEmitter::log_to_buffer();
    assert!(import_dot(source, alphabet, &mut diag).is_none());
    assert_eq!(
        diag.err_buffer().unwrap(),
        "[line 2] Error: Too many distinct labels, the alphabet cannot hold more than 65536 symbols.\n"
    );
}
