//! A single declared lexical rule: a named regex branch plus a converter.

use std::fmt;
use std::sync::Arc;

use crate::rephrase::token::Token;

/// Builds a token from the matched text, or `None` to discard the fragment
/// (skippable input such as whitespace or comments).
pub type Convert = Arc<dyn Fn(&str) -> Option<Token> + Send + Sync>;

/// One lexical rule. The name doubles as the branch's regex group name, so
/// it must be unique within a lexer and a valid group identifier.
#[derive(Clone)]
pub struct TokenRule {
    name: String,
    body: String,
    convert: Convert,
}

impl TokenRule {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, convert: Convert) -> TokenRule {
        TokenRule {
            name: name.into(),
            body: pattern.into(),
            convert,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule rendered as an alternation branch.
    pub(crate) fn branch(&self) -> String {
        format!("(?P<{}>{})", self.name, self.body)
    }

    /// Whether this rule's group participated in the given match.
    pub(crate) fn claims(&self, caps: &regex::Captures<'_>) -> bool {
        caps.name(&self.name).is_some()
    }

    pub(crate) fn token(&self, matched: &str) -> Option<Token> {
        (self.convert)(matched)
    }
}

impl fmt::Debug for TokenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRule")
            .field("name", &self.name)
            .field("body", &self.body)
            .finish()
    }
}
