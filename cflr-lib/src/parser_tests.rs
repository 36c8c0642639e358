use cfl::grammar::{Alphabet, Grammar};
use cfl::graph::{Edge, Node};
use utils::DiagnosticEmitter;

use super::parser::*;
use super::{build_graph, default_grammar, load_edges, load_grammar};

fn parse_edges(source: &str) -> (Option<EdgeList>, String) {
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let result = load_edges(source, Alphabet::new(), &mut diag);
    (result, diag.err_buffer().unwrap())
}

fn parse_grammar(source: &str) -> (Option<ParsedGrammar>, String) {
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let result = load_grammar(source, Alphabet::new(), &mut diag);
    (result, diag.err_buffer().unwrap())
}

#[test]
fn parse_edge_list() {
    let (result, errors) = parse_edges("# header\n10 20 A\n\n20 30 B\n10 20 A\n");
    let list = result.unwrap();
    assert_eq!(errors, "");

    let a = list.alphabet.lookup("A").unwrap();
    let b = list.alphabet.lookup("B").unwrap();
    assert_eq!(list.node_names, None);
    assert_eq!(list.node_count, 31);
    assert_eq!(
        list.edges,
        vec![Edge::new(10, 20, a), Edge::new(20, 30, b), Edge::new(10, 20, a)]
    );
}

#[test]
fn edge_list_keeps_sparse_ids() {
    let (result, errors) = parse_edges("5 0 A\n0 1 B\n3 3 A\n");
    let list = result.unwrap();
    assert_eq!(errors, "");

    let a = list.alphabet.lookup("A").unwrap();
    let b = list.alphabet.lookup("B").unwrap();
    assert_eq!(list.node_count, 6);
    assert_eq!(
        list.edges,
        vec![Edge::new(5, 0, a), Edge::new(0, 1, b), Edge::new(3, 3, a)]
    );
}

#[test]
fn parse_empty_edge_list() {
    let (result, errors) = parse_edges("\n\n# nothing here\n");
    let list = result.unwrap();
    assert!(list.edges.is_empty());
    assert_eq!(list.node_count, 0);
    assert_eq!(errors, "");
}

#[test]
fn edge_list_errors() {
    let cases = [
        ("1 2\n", "[line 1] Error at end of line: Expected the label of an edge.\n"),
        ("1 2 A B\n", "[line 1] Error at 'B': Expected end of line.\n"),
        ("1 A 2\n", "[line 1] Error at 'A': Expected the target node of an edge.\n"),
        ("1 2 A\nS -> A", "[line 2] Error at 'S': Expected the source node of an edge.\n"),
        ("1", "[line 1] Error at end of file: Expected the target node of an edge.\n"),
        (
            "0 16777216 A\n",
            "[line 1] Error at '16777216': Node id is larger than the supported maximum of 16777215.\n",
        ),
    ];
    for (source, expected) in cases {
        let (result, errors) = parse_edges(source);
        assert!(result.is_none(), "{source}");
        assert_eq!(errors, expected);
    }
}

#[test]
fn parse_productions() {
    let (result, errors) = parse_grammar("S -> A B | S B\n\nT -> S # unary\nE -> eps\n");
    let ParsedGrammar {
        productions,
        alphabet,
    } = result.unwrap();
    assert_eq!(errors, "");

    let sym = |name| alphabet.lookup(name).unwrap();
    assert_eq!(productions.combine(sym("A"), sym("B")), Some(sym("S")));
    assert_eq!(productions.combine(sym("S"), sym("B")), Some(sym("S")));
    assert_eq!(productions.combine(sym("B"), sym("A")), None);
    assert_eq!(productions.unary(sym("S")), Some(sym("T")));
    assert_eq!(productions.epsilon(), &[sym("E")]);
    assert_eq!(productions.len(), 4);
}

#[test]
fn grammar_errors() {
    let cases = [
        (
            "S -> A B C",
            "[line 1] Error at 'A': Production bodies can have at most two symbols, normalize the grammar first.\n",
        ),
        (
            "S -> A B\nT -> A B\n",
            "[line 2] Error at 'A': Conflicting production, 'A B' already reduces to 'S', cannot also reduce to 'T'.\n",
        ),
        (
            "S -> A\nT -> A\n",
            "[line 2] Error at 'A': Conflicting production, 'A' already reduces to 'S', cannot also reduce to 'T'.\n",
        ),
        (
            "S A B",
            "[line 1] Error at 'A': Expected '->' after the head of a production.\n",
        ),
        ("S -> | A", "[line 1] Error at '|': Expected the body of a production.\n"),
        ("S ->\n", "[line 1] Error at end of line: Expected the body of a production.\n"),
        ("S -> eps A", "[line 1] Error at 'A': Expected end of line.\n"),
        ("-> A", "[line 1] Error at '->': Expected the head of a production.\n"),
    ];
    for (source, expected) in cases {
        let (result, errors) = parse_grammar(source);
        assert!(result.is_none(), "{source}");
        assert_eq!(errors, expected);
    }
}

#[test]
fn grammar_and_edges_share_symbols() {
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let grammar = load_grammar("S -> A B", Alphabet::new(), &mut diag).unwrap();
    let s = grammar.alphabet.lookup("S").unwrap();
    let list = load_edges("1 2 B\n2 3 C", grammar.alphabet.clone(), &mut diag).unwrap();

    assert_eq!(list.alphabet.lookup("S"), Some(s));
    assert_eq!(list.alphabet.lookup("B"), grammar.alphabet.lookup("B"));
    assert_eq!(list.alphabet.len(), 4);
    assert_eq!(diag.err_buffer().unwrap(), "");
}

#[test]
fn build_initial_graph() {
    let mut diag = DiagnosticEmitter::log_to_buffer();
    let grammar = default_grammar().unwrap();
    let list = load_edges("5 6 A\n6 7 B\n5 6 A\n", grammar.alphabet, &mut diag).unwrap();
    let graph = build_graph(&list, &mut diag).unwrap();

    let a = list.alphabet.lookup("A").unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.active_node_count(), 3);
    assert!(graph.has_edge(Node(5), Node(6), a));
    assert_eq!(diag.err_buffer().unwrap(), "");
}

#[test]
fn default_grammar_rule() {
    let ParsedGrammar {
        productions,
        alphabet,
    } = default_grammar().unwrap();
    let sym = |name| alphabet.lookup(name).unwrap();
    assert_eq!(productions.combine(sym("A"), sym("B")), Some(sym("S")));
    assert_eq!(productions.len(), 1);
}
