//! The rewrite rule: serialize, match, extract, combine, splice, repeat.
//!
//!     One rule owns a compiled [Pattern] and a combinator. Applying it
//!     runs the rewrite step until the pattern stops matching (the rule's
//!     fixpoint) or the iteration cap is hit. Each step:
//!
//!     1. Serialize the sentence, one `Identifier(index)` word per token,
//!        indices taken from the current array.
//!     2. Find the leftmost pattern match over that text.
//!     3. Decode each matched word back into its position index.
//!     4. Clone the captured tokens and hand them to the combinator, which
//!        produces exactly one new token.
//!     5. Splice: everything before the first captured position, the new
//!        token, everything after the last.
//!
//! The iteration cap is a safety valve against non-converging rules, not an
//! error: hitting it returns the sentence as rewritten so far.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rephrase::parsing::common::ParseError;
use crate::rephrase::parsing::pattern::Pattern;
use crate::rephrase::token::{Sentence, Token};

/// Builds one new token from the captured tokens, in declared parameter
/// order. Policy expansions wrap these to re-map or absent-fill arguments.
pub type Combine = Arc<dyn Fn(Vec<Token>) -> Token + Send + Sync>;

/// Upper bound on rewrite steps per `apply` call; the only runaway bound.
pub const MAX_REWRITES: usize = 100;

/// Decodes an `Identifier(index)` word from a matched span.
static WORD_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\((\d+)\)").unwrap());

/// One production rule: a pattern over shape identifiers plus a combinator.
#[derive(Clone)]
pub struct RewriteRule {
    pattern: Pattern,
    combine: Combine,
}

impl RewriteRule {
    pub fn new(pattern: Pattern, combine: Combine) -> RewriteRule {
        RewriteRule { pattern, combine }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Rewrite `sentence` to this rule's fixpoint.
    ///
    /// Refuses to run over unrecognized input: if the sentence contains any
    /// unmatched token the call fails naming the raw fragments.
    pub fn apply(&self, sentence: Sentence) -> Result<Sentence, ParseError> {
        let fragments: Vec<String> = sentence
            .iter()
            .filter_map(Token::as_unmatched)
            .map(str::to_owned)
            .collect();
        if !fragments.is_empty() {
            return Err(ParseError::UnrecognizedInput { fragments });
        }

        let mut current = sentence;
        for _ in 0..MAX_REWRITES {
            let Some(next) = self.step(&current)? else {
                return Ok(current);
            };
            if next == current {
                // The combinator reproduced its own capture; converged.
                return Ok(current);
            }
            current = next;
        }
        Ok(current)
    }

    /// One rewrite step. `None` means the pattern no longer matches.
    fn step(&self, sentence: &[Token]) -> Result<Option<Sentence>, ParseError> {
        let serialized = alphabet(sentence);
        let Some(matched) = self.pattern.find(&serialized) else {
            return Ok(None);
        };

        let indices = ordinals(matched);
        let (Some(&start), Some(&end)) = (indices.first(), indices.last()) else {
            // A zero-width match rewrites nothing.
            return Ok(None);
        };

        if indices.len() != end - start + 1 {
            return Err(ParseError::NonContiguousCapture { indices });
        }

        let captured: Vec<Token> = indices.iter().map(|&i| sentence[i].clone()).collect();
        let combined = (self.combine)(captured);

        let mut next = Vec::with_capacity(sentence.len() - (end - start));
        next.extend_from_slice(&sentence[..start]);
        next.push(combined);
        next.extend_from_slice(&sentence[end + 1..]);
        Ok(Some(next))
    }
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
            .field("pattern", &self.pattern.text())
            .finish()
    }
}

/// Render a sentence into the matching alphabet: one `Identifier(index)`
/// word per token, separated by single spaces.
pub(crate) fn alphabet(sentence: &[Token]) -> String {
    sentence
        .iter()
        .enumerate()
        .map(|(index, token)| format!("{}({})", token.shape().identifier(), index))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the position index of every `Identifier(index)` word in a
/// matched span. Spans are whole fragments by construction (word fragments
/// carry their own boundaries), so the scan is exhaustive.
fn ordinals(matched: &str) -> Vec<usize> {
    WORD_INDEX
        .captures_iter(matched)
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| digits.as_str().parse().ok())
        .collect()
}
