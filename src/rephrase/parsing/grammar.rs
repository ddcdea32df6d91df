//! The grammar: an ordered rule set over a lexer.
//!
//! Rules run in declaration order, each to its own fixpoint, so earlier
//! rules act as higher-priority productions. A grammar is immutable and
//! reusable across any number of parse calls.

use std::fmt;

use crate::rephrase::lexing::lexer::Lexer;
use crate::rephrase::parsing::common::ParseError;
use crate::rephrase::parsing::rule::RewriteRule;
use crate::rephrase::token::{Sentence, Shape, Token, Value};

pub struct Grammar {
    lexer: Lexer,
    rules: Vec<RewriteRule>,
}

impl Grammar {
    pub(crate) fn new(lexer: Lexer, rules: Vec<RewriteRule>) -> Grammar {
        Grammar { lexer, rules }
    }

    /// Classify text without rewriting it.
    pub fn tokenize(&self, text: &str) -> Sentence {
        self.lexer.tokenize(text)
    }

    /// The expanded rule set, in application order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Apply every rule in declaration order, each to its own fixpoint.
    pub fn parse(&self, sentence: Sentence) -> Result<Sentence, ParseError> {
        self.rules
            .iter()
            .try_fold(sentence, |current, rule| rule.apply(current))
    }

    /// Tokenize then rewrite.
    pub fn parse_text(&self, text: &str) -> Result<Sentence, ParseError> {
        self.parse(self.tokenize(text))
    }

    /// Parse to a single token of the requested shape.
    ///
    /// Fails with [ParseError::ResidualTokens] when rewriting completes but
    /// leaves anything other than exactly one token of that shape.
    pub fn parse_as(&self, text: &str, shape: &Shape) -> Result<Token, ParseError> {
        let mut result = self.parse_text(text)?;
        if result.len() == 1 && result[0].shape() == shape {
            return Ok(result.remove(0));
        }
        Err(ParseError::ResidualTokens {
            expected: shape.identifier(),
            found: result.iter().map(|t| t.shape().identifier()).collect(),
        })
    }

    /// Like [Grammar::parse_as], returning just the payload.
    pub fn parse_value(&self, text: &str, shape: &Shape) -> Result<Value, ParseError> {
        self.parse_as(text, shape).map(Token::into_payload)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("lexer", &self.lexer)
            .field("rules", &self.rules)
            .finish()
    }
}
