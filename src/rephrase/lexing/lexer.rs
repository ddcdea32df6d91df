//! The lexer: one alternation regex over all declared rules, a cursor-based
//! scan that accounts for every character, and a concurrent memo cache.

use std::fmt;

use dashmap::DashMap;
use regex::Regex;

use crate::rephrase::lexing::token_rule::TokenRule;
use crate::rephrase::token::{Sentence, Token};

/// Errors raised while freezing a lexer from its declared rules.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A rule's regex body (or its name, as a group name) failed to compile.
    InvalidTokenRule { name: String, message: String },
    /// Two rules share a name; branch identification would be ambiguous.
    DuplicateRuleName { name: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidTokenRule { name, message } => {
                write!(f, "Invalid token rule '{name}': {message}")
            }
            LexError::DuplicateRuleName { name } => {
                write!(f, "Duplicate token rule name '{name}'")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Converts text into a [Sentence]. Immutable after construction except for
/// the append-only tokenization cache; safe to share across threads.
pub struct Lexer {
    rules: Vec<TokenRule>,
    ignore_unmatched: bool,
    regex: Regex,
    cache: DashMap<String, Sentence>,
}

impl Lexer {
    /// Compile the declared rules into one alternation matcher. Each branch
    /// is validated on its own first so the error can name the rule.
    pub(crate) fn new(rules: Vec<TokenRule>, ignore_unmatched: bool) -> Result<Lexer, LexError> {
        for (index, rule) in rules.iter().enumerate() {
            if rules[..index].iter().any(|seen| seen.name() == rule.name()) {
                return Err(LexError::DuplicateRuleName {
                    name: rule.name().to_owned(),
                });
            }
            if let Err(err) = Regex::new(&rule.branch()) {
                return Err(LexError::InvalidTokenRule {
                    name: rule.name().to_owned(),
                    message: err.to_string(),
                });
            }
        }

        let branches: Vec<String> = rules.iter().map(TokenRule::branch).collect();
        let alternation = format!("({})", branches.join("|"));
        let regex = Regex::new(&alternation).map_err(|err| LexError::InvalidTokenRule {
            name: "<combined>".to_owned(),
            message: err.to_string(),
        })?;

        Ok(Lexer {
            rules,
            ignore_unmatched,
            regex,
            cache: DashMap::new(),
        })
    }

    /// Classify `text` into a sentence. Total: never fails, every character
    /// is either consumed by a declared rule or becomes part of an
    /// Unmatched fragment (kept or suppressed per configuration).
    pub fn tokenize(&self, text: &str) -> Sentence {
        if let Some(hit) = self.cache.get(text) {
            return hit.value().clone();
        }

        let mut sentence = Sentence::new();
        let mut cursor = 0;

        for caps in self.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };

            // Text between the previous match and this one is unrecognized.
            if whole.start() > cursor {
                self.push_unmatched(&text[cursor..whole.start()], &mut sentence);
            }
            cursor = whole.end();

            match self.rules.iter().find(|rule| rule.claims(&caps)) {
                Some(rule) => {
                    if let Some(token) = rule.token(whole.as_str()) {
                        sentence.push(token);
                    }
                }
                None => self.push_unmatched(whole.as_str(), &mut sentence),
            }
        }

        // Trailing remainder gets the same treatment as inner gaps.
        if cursor < text.len() {
            self.push_unmatched(&text[cursor..], &mut sentence);
        }

        self.cache.insert(text.to_owned(), sentence.clone());
        sentence
    }

    fn push_unmatched(&self, raw: &str, sentence: &mut Sentence) {
        if self.ignore_unmatched {
            return;
        }
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            sentence.push(Token::unmatched(trimmed));
        }
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("rules", &self.rules)
            .field("ignore_unmatched", &self.ignore_unmatched)
            .finish()
    }
}
