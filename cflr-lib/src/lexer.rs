use std::collections::HashMap;

use cfl::grammar::{Alphabet, Symbol};
use lazy_static::lazy_static;
use utils::DiagnosticEmitter;

#[derive(Clone, Debug, Copy, Eq, PartialEq, Hash)]
pub struct Location(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    Integer(usize),
    Name(Symbol),

    // Grammar
    Arrow,
    Pipe,
    Epsilon,

    EndOfLine,
    EndOfFile,
}

use TokenValue::*;

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenValue> =
        HashMap::from([("eps", Epsilon), ("epsilon", Epsilon)]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub value: TokenValue,

    pub line_num: Location,
}

impl Token {
    /// Human readable form of the token for error messages.
    pub fn describe(&self, alphabet: &Alphabet) -> String {
        match self.value {
            Integer(i) => format!("'{i}'"),
            Name(sym) => format!("'{}'", alphabet.name(sym)),
            Arrow => "'->'".to_owned(),
            Pipe => "'|'".to_owned(),
            Epsilon => "'eps'".to_owned(),
            EndOfLine => "end of line".to_owned(),
            EndOfFile => "end of file".to_owned(),
        }
    }
}

/// Splits edge lists and grammar files into tokens. Both formats are line
/// based, so line breaks are tokens too. Names are interned into the
/// alphabet the lexer was created with, so symbols are shared between the
/// grammar and the graph.
pub struct Lexer<'src> {
    source: &'src [u8],
    start: usize,
    current: usize,
    line_num: u32,
    diagnostic_emitter: &'src mut DiagnosticEmitter,
    alphabet: Alphabet,
}

#[derive(Debug, Clone, Default)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub alphabet: Alphabet,
}

impl<'src> Lexer<'src> {
    pub fn new(
        source: &'src str,
        alphabet: Alphabet,
        diagnostic_emitter: &'src mut DiagnosticEmitter,
    ) -> Self {
        Lexer {
            source: source.as_bytes(),
            start: 0,
            current: 0,
            line_num: 1,
            diagnostic_emitter,
            alphabet,
        }
    }

    /// Returns `None` after reporting the first lexical error.
    pub fn lex_all(mut self) -> Option<LexResult> {
        if !self.source.is_ascii() {
            self.diagnostic_emitter
                .error(self.line_num, "Only ASCII input is supported.");
            return None;
        }

        let mut tokens = Vec::new();
        while let Some(tok) = self.lex()? {
            tokens.push(tok);
        }

        tokens.push(Token {
            value: EndOfFile,
            line_num: Location(self.line_num),
        });

        Some(LexResult {
            tokens,
            alphabet: self.alphabet,
        })
    }

    // The outer option is None on error, the inner one at the end of input.
    fn lex(&mut self) -> Option<Option<Token>> {
        loop {
            if self.is_at_end() {
                return Some(None);
            }

            self.start = self.current;
            let line_num = Location(self.line_num);
            let value = match self.advance() {
                '\n' => {
                    self.line_num += 1;
                    EndOfLine
                }
                ' ' | '\t' | '\r' => continue,
                '#' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                    continue;
                }
                '|' => Pipe,
                '-' => {
                    if !self.match_char('>') {
                        self.error("Expected '>' after '-', node ids cannot be negative.");
                        return None;
                    }
                    Arrow
                }
                c if c.is_ascii_digit() => self.lex_number()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_name()?,
                _ => {
                    let text = self.lexeme().to_owned();
                    self.error(&format!("Unexpected token: '{text}'."));
                    return None;
                }
            };
            return Some(Some(Token { value, line_num }));
        }
    }

    fn lex_number(&mut self) -> Option<TokenValue> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek().is_ascii_alphabetic() || self.peek() == '_' {
            self.advance();
            let text = self.lexeme().to_owned();
            self.error(&format!("Invalid number: '{text}'."));
            return None;
        }

        if let Ok(value) = self.lexeme().parse() {
            return Some(Integer(value));
        }
        let text = self.lexeme().to_owned();
        self.error(&format!("Number out of range: '{text}'."));
        None
    }

    fn lex_name(&mut self) -> Option<TokenValue> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let name = self.lexeme();
        if let Some(&keyword) = KEYWORDS.get(name) {
            return Some(keyword);
        }
        match self.alphabet.intern(name) {
            Ok(sym) => Some(Name(sym)),
            Err(err) => {
                self.error(&format!("Too many distinct labels, {err}."));
                None
            }
        }
    }

    fn lexeme(&self) -> &'src str {
        // Only ASCII input is accepted, so every index is a char boundary.
        let source = self.source;
        core::str::from_utf8(&source[self.start..self.current]).unwrap_or_default()
    }

    fn error(&mut self, msg: &str) {
        self.diagnostic_emitter.error(self.line_num, msg);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> char {
        self.source.get(self.current).map_or('\0', |&b| b as char)
    }

    fn advance(&mut self) -> char {
        let prev = self.peek();
        self.current += 1;
        prev
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected && !self.is_at_end() {
            self.current += 1;
            true
        } else {
            false
        }
    }
}
