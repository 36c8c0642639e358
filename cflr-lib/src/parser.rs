use cfl::grammar::{Alphabet, Grammar, ProductionTable, Symbol};
use cfl::graph::Edge;
use utils::DiagnosticEmitter;

use crate::lexer::{LexResult, Token, TokenValue};

/// Largest node id accepted in an edge list. Every id below it is part of
/// the node domain, so it bounds the size of the graph.
pub const MAX_NODE_ID: usize = (1 << 24) - 1;

/// Initial edges of a graph read from some external format, over the nodes
/// `0..node_count`.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    pub edges: Vec<Edge<Symbol>>,
    pub node_count: usize,
    /// Names of the nodes when the input did not number them, indexed by
    /// node id. `None` means the ids themselves are the names.
    pub node_names: Option<Vec<String>>,
    pub alphabet: Alphabet,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedGrammar {
    pub productions: ProductionTable<Symbol>,
    pub alphabet: Alphabet,
}

/// Parses two line based formats:
/// * edge lists, one `src dst label` triple per line,
/// * grammars, one `Head -> Body | Body ...` production per line, where a
///   body is one or two symbols or `eps`.
pub struct Parser<'src> {
    current_tok: usize,
    tokens: Vec<Token>,
    alphabet: Alphabet,
    diag: &'src mut DiagnosticEmitter,
}

use TokenValue::*;

impl<'src> Parser<'src> {
    pub fn new(lexed: LexResult, diag: &'src mut DiagnosticEmitter) -> Self {
        let LexResult { tokens, alphabet } = lexed;
        Parser {
            current_tok: 0,
            tokens,
            alphabet,
            diag,
        }
    }

    pub fn parse_edges(mut self) -> Option<EdgeList> {
        let mut node_count = 0;
        let mut edges = Vec::new();
        loop {
            self.skip_blank_lines();
            if self.is_at_end() {
                break;
            }
            let src = self.consume_node("Expected the source node of an edge.")?;
            let dst = self.consume_node("Expected the target node of an edge.")?;
            let label = self.consume_name("Expected the label of an edge.")?;
            self.consume_line_end()?;

            node_count = node_count.max(src.max(dst) + 1);
            edges.push(Edge::new(src, dst, label));
        }

        Some(EdgeList {
            edges,
            node_count,
            node_names: None,
            alphabet: self.alphabet,
        })
    }

    pub fn parse_grammar(mut self) -> Option<ParsedGrammar> {
        let mut productions = ProductionTable::new();
        loop {
            self.skip_blank_lines();
            if self.is_at_end() {
                break;
            }
            let head = self.consume_name("Expected the head of a production.")?;
            self.consume(Arrow, "Expected '->' after the head of a production.")?;
            loop {
                self.parse_body(head, &mut productions)?;
                if self.try_consume(Pipe).is_none() {
                    break;
                }
            }
            self.consume_line_end()?;
        }

        Some(ParsedGrammar {
            productions,
            alphabet: self.alphabet,
        })
    }

    fn parse_body(&mut self, head: Symbol, productions: &mut ProductionTable<Symbol>) -> Option<()> {
        let start = self.peek();
        if self.try_consume(Epsilon).is_some() {
            productions.add_epsilon(head);
            return Some(());
        }

        let mut body = Vec::new();
        while let Name(sym) = self.peek().value {
            self.advance();
            body.push(sym);
        }

        let added = match body[..] {
            [] => {
                self.error(self.peek(), "Expected the body of a production.");
                return None;
            }
            [single] => productions.add_unary(head, single).is_ok(),
            [left, right] => productions.add_binary(head, left, right).is_ok(),
            _ => {
                self.error(
                    start,
                    "Production bodies can have at most two symbols, normalize the grammar first.",
                );
                return None;
            }
        };

        if !added {
            let existing = match body[..] {
                [single] => productions.unary(single),
                [left, right] => productions.combine(left, right),
                _ => None,
            };
            let body: Vec<_> = body.iter().map(|&s| self.alphabet.name(s)).collect();
            let existing = existing.map_or("", |s| self.alphabet.name(s));
            let msg = format!(
                "Conflicting production, '{}' already reduces to '{existing}', cannot also reduce to '{}'.",
                body.join(" "),
                self.alphabet.name(head)
            );
            self.error(start, &msg);
            return None;
        }
        Some(())
    }

    fn skip_blank_lines(&mut self) {
        while self.try_consume(EndOfLine).is_some() {}
    }

    fn consume_line_end(&mut self) -> Option<()> {
        if self.is_at_end() || self.try_consume(EndOfLine).is_some() {
            return Some(());
        }
        self.error(self.peek(), "Expected end of line.");
        None
    }

    fn consume_integer(&mut self, msg: &str) -> Option<usize> {
        if let Integer(value) = self.peek().value {
            self.advance();
            return Some(value);
        }
        self.error(self.peek(), msg);
        None
    }

    fn consume_node(&mut self, msg: &str) -> Option<usize> {
        let tok = self.peek();
        let id = self.consume_integer(msg)?;
        if id > MAX_NODE_ID {
            self.error(
                tok,
                &format!("Node id is larger than the supported maximum of {MAX_NODE_ID}."),
            );
            return None;
        }
        Some(id)
    }

    fn consume_name(&mut self, msg: &str) -> Option<Symbol> {
        if let Name(sym) = self.peek().value {
            self.advance();
            return Some(sym);
        }
        self.error(self.peek(), msg);
        None
    }

    fn peek(&self) -> Token {
        self.tokens[self.current_tok]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current_tok - 1]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().value, EndOfFile)
    }

    fn check(&self, tok_val: TokenValue) -> bool {
        if self.is_at_end() {
            false
        } else {
            core::mem::discriminant(&self.peek().value) == core::mem::discriminant(&tok_val)
        }
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current_tok += 1;
        }
        self.previous()
    }

    fn consume(&mut self, tok_val: TokenValue, s: &str) -> Option<Token> {
        if self.check(tok_val) {
            return Some(self.advance());
        }
        self.error(self.peek(), s);
        None
    }

    fn try_consume(&mut self, tok_val: TokenValue) -> Option<Token> {
        if self.check(tok_val) {
            return Some(self.advance());
        }
        None
    }

    fn error(&mut self, tok: Token, s: &str) {
        let item = format!("at {}", tok.describe(&self.alphabet));
        self.diag.report(tok.line_num.0, &item, s);
    }
}
