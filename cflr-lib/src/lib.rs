//! Frontend glue for the `cfl` crate: reading initial edges and grammars
//! from text, importing graphviz dumps and printing the results.

use cfl::grammar::{Alphabet, ProductionTable, Symbol};
use cfl::graph::LabeledGraph;
use cfl::CflError;
use utils::DiagnosticEmitter;

pub mod dot;
pub mod lexer;
pub mod parser;
pub mod report;

use lexer::Lexer;
use parser::{EdgeList, ParsedGrammar, Parser};

/// Grammar used when none is given: `S -> A B`.
pub fn default_grammar() -> Result<ParsedGrammar, CflError> {
    let mut alphabet = Alphabet::new();
    let s = alphabet.intern("S")?;
    let a = alphabet.intern("A")?;
    let b = alphabet.intern("B")?;
    let mut productions = ProductionTable::new();
    productions.add_binary(s, a, b)?;
    Ok(ParsedGrammar {
        productions,
        alphabet,
    })
}

pub fn load_grammar(
    source: &str,
    alphabet: Alphabet,
    diag: &mut DiagnosticEmitter,
) -> Option<ParsedGrammar> {
    let lexed = Lexer::new(source, alphabet, diag).lex_all()?;
    Parser::new(lexed, diag).parse_grammar()
}

pub fn load_edges(
    source: &str,
    alphabet: Alphabet,
    diag: &mut DiagnosticEmitter,
) -> Option<EdgeList> {
    let lexed = Lexer::new(source, alphabet, diag).lex_all()?;
    Parser::new(lexed, diag).parse_edges()
}

/// Builds the initial graph. Only labels known to the alphabet are accepted,
/// so the grammar has to be loaded into the alphabet before the edges.
pub fn build_graph(edges: &EdgeList, diag: &mut DiagnosticEmitter) -> Option<LabeledGraph<Symbol>> {
    let mut graph = LabeledGraph::new(edges.node_count);
    graph.restrict_labels(edges.alphabet.symbols());
    for &edge in &edges.edges {
        if let Err(err) = graph.insert(edge) {
            diag.err_ln(&format!("Error: {err}"));
            return None;
        }
    }
    Some(graph)
}


#[cfg(test)]
mod parser_tests;

#[cfg(test)]
mod dot_tests;
