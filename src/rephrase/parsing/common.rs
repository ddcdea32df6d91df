//! Common parsing types
//!
//! This module contains the error surface shared by the rewrite engine and
//! the grammar layer.

use std::fmt;

/// Errors that can occur while rewriting a sentence.
///
/// All of these are terminal for the call that produced them; nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The sentence still contains raw text the lexer could not classify.
    /// Rewriting never proceeds around unrecognized input.
    UnrecognizedInput { fragments: Vec<String> },
    /// A pattern captured positions that do not form a contiguous block.
    /// Splicing such a span would silently drop the interior tokens, so the
    /// engine fails instead. Patterns compiled from the mini-language
    /// always capture contiguous runs.
    NonContiguousCapture { indices: Vec<usize> },
    /// Rewriting finished but did not leave exactly one token of the
    /// requested shape. `found` lists the leftover shape identifiers.
    ResidualTokens { expected: String, found: Vec<String> },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnrecognizedInput { fragments } => {
                write!(f, "Unrecognized input: {}", fragments.join(" "))
            }
            ParseError::NonContiguousCapture { indices } => {
                write!(f, "Captured positions are not contiguous: {indices:?}")
            }
            ParseError::ResidualTokens { expected, found } if found.is_empty() => {
                write!(f, "Expected a single {expected}, found an empty sentence")
            }
            ParseError::ResidualTokens { expected, found } => {
                write!(
                    f,
                    "Expected a single {expected}, found {} tokens: {}",
                    found.len(),
                    found.join(" ")
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
