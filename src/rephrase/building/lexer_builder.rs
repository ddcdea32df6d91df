//! Append-only lexer descriptor.

use std::sync::Arc;

use crate::rephrase::lexing::lexer::{LexError, Lexer};
use crate::rephrase::lexing::token_rule::TokenRule;
use crate::rephrase::token::{Shape, Token, Value};

/// Collects lexical rules in declaration order; `build` freezes them into a
/// [Lexer]. Declaration order is match priority.
#[derive(Debug, Default)]
pub struct LexerBuilder {
    rules: Vec<TokenRule>,
    ignore_unmatched: bool,
}

impl LexerBuilder {
    pub fn new() -> LexerBuilder {
        LexerBuilder::default()
    }

    /// Declare a rule with a converter. Returning `None` from the converter
    /// discards the fragment.
    pub fn token<F>(mut self, name: &str, pattern: &str, convert: F) -> Self
    where
        F: Fn(&str) -> Option<Token> + Send + Sync + 'static,
    {
        self.rules.push(TokenRule::new(name, pattern, Arc::new(convert)));
        self
    }

    /// Declare a rule producing the same token for every match (marker
    /// tokens such as operators).
    pub fn constant(self, name: &str, pattern: &str, token: Token) -> Self {
        self.token(name, pattern, move |_| Some(token.clone()))
    }

    /// Declare a rule whose matches are always discarded (whitespace,
    /// comments).
    pub fn ignore(self, name: &str, pattern: &str) -> Self {
        self.token(name, pattern, |_| None)
    }

    /// Declare a word table: one branch alternating `\bword\b` for every
    /// entry, mapping the matched word to its value under `shape`. Words
    /// are matched literally and case-sensitively.
    pub fn lookup(self, name: &str, shape: Shape, entries: Vec<(String, Value)>) -> Self {
        let pattern = entries
            .iter()
            .map(|(word, _)| format!(r"\b{word}\b"))
            .collect::<Vec<_>>()
            .join("|");
        self.token(name, &pattern, move |matched| {
            entries
                .iter()
                .find(|(word, _)| word == matched)
                .map(|(_, value)| Token::new(shape.clone(), value.clone()))
        })
    }

    /// Suppress Unmatched tokens instead of keeping them.
    pub fn ignore_unmatched(mut self) -> Self {
        self.ignore_unmatched = true;
        self
    }

    /// Append another builder's rules after this one's.
    pub fn merge(mut self, other: LexerBuilder) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn build(self) -> Result<Lexer, LexError> {
        Lexer::new(self.rules, self.ignore_unmatched)
    }
}
