//! Pattern mini-language compiler
//!
//!     Rule patterns are written over shape identifiers, not characters:
//!     a bare word matches one token of that shape at any position,
//!     `( )` groups, `|` alternates, and `{min,max}` / `{min,}` repeats
//!     the preceding word or group. Whitespace separates terms and is
//!     otherwise insignificant.
//!
//! ## Compilation
//!
//! The pattern text is itself lexed (with logos) into primitive units, then
//! each unit is rendered into a regex fragment over the serialized-sentence
//! alphabet. A sentence serializes as `Identifier(index)` words, so a bare
//! word renders as the identifier followed by a wildcard position marker:
//!
//! ```text
//! Pattern:  "Number (Plus|Minus) Number"
//! Rendered: (\bNumber\b\(\d+\) {0,1})((\bPlus\b\(\d+\) {0,1})|(\bMinus\b\(\d+\) {0,1}))(\bNumber\b\(\d+\) {0,1})
//! ```
//!
//! Positions are wildcards because earlier rule firings shift them between
//! iterations; only the identifiers are known at compile time.

use std::fmt;

use logos::Logos;
use regex::Regex;

use crate::rephrase::token::Shape;

/// Errors raised while compiling pattern text.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// Pattern text was empty.
    EmptyPattern,
    /// A character outside the mini-language, at the given byte offset.
    UnrecognizedCharacter { position: usize },
    /// Group parentheses did not balance.
    UnbalancedGroups,
    /// The rendered regex failed to compile (e.g. an inverted repetition).
    InvalidPattern(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPattern => write!(f, "Empty pattern"),
            PatternError::UnrecognizedCharacter { position } => {
                write!(f, "Unrecognized pattern character at offset {position}")
            }
            PatternError::UnbalancedGroups => write!(f, "Invalid pattern, unmatched groups"),
            PatternError::InvalidPattern(message) => {
                write!(f, "Invalid regex pattern: {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Primitive units of the pattern mini-language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
enum PatternUnit {
    #[regex(r"\w+", |lex| lex.slice().to_owned())]
    Word(String),

    #[token("(")]
    OpenGroup,

    #[token(")")]
    CloseGroup,

    /// `{min}`, `{min,}` or `{min,max}`; a bare `{min}` means exactly min.
    #[regex(r"\{[0-9]+(,[0-9]*)?\}", repeat_bounds)]
    Repeat((u32, Option<u32>)),

    #[token("|")]
    Or,
}

fn repeat_bounds(lex: &mut logos::Lexer<PatternUnit>) -> Option<(u32, Option<u32>)> {
    let body = lex.slice().trim_start_matches('{').trim_end_matches('}');
    match body.split_once(',') {
        None => body.parse().ok().map(|min| (min, Some(min))),
        Some((min, "")) => min.parse().ok().map(|min| (min, None)),
        Some((min, max)) => match (min.parse().ok(), max.parse().ok()) {
            (Some(min), Some(max)) => Some((min, Some(max))),
            _ => None,
        },
    }
}

/// A compiled matcher over the serialized-sentence alphabet.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    regex: Regex,
}

impl Pattern {
    /// Compile mini-language text.
    pub fn from_text(text: &str) -> Result<Pattern, PatternError> {
        if text.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let units = lex_units(text)?;
        let rendered = render(&units)?;
        let regex =
            Regex::new(&rendered).map_err(|err| PatternError::InvalidPattern(err.to_string()))?;

        Ok(Pattern {
            text: text.to_owned(),
            regex,
        })
    }

    /// Compile an ordered shape tuple: an exact contiguous run of tokens
    /// bearing those identifiers, in that order, anywhere in the sentence.
    pub fn from_shapes(shapes: &[Shape]) -> Result<Pattern, PatternError> {
        let text = shapes
            .iter()
            .map(Shape::identifier)
            .collect::<Vec<_>>()
            .join(" ");
        Pattern::from_text(&text)
    }

    /// The original mini-language text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leftmost unanchored match against a serialized sentence.
    pub(crate) fn find<'t>(&self, serialized: &'t str) -> Option<&'t str> {
        self.regex.find(serialized).map(|m| m.as_str())
    }
}

fn lex_units(text: &str) -> Result<Vec<PatternUnit>, PatternError> {
    let mut lexer = PatternUnit::lexer(text);
    let mut units = Vec::new();
    while let Some(item) = lexer.next() {
        match item {
            Ok(unit) => units.push(unit),
            Err(()) => {
                return Err(PatternError::UnrecognizedCharacter {
                    position: lexer.span().start,
                })
            }
        }
    }
    Ok(units)
}

/// Render units into one regex over the serialized alphabet. A word matches
/// its identifier, any position digits, and an optional trailing separator
/// so consecutive words chain across fragments.
fn render(units: &[PatternUnit]) -> Result<String, PatternError> {
    let mut rendered = String::new();
    let mut depth: i32 = 0;

    for unit in units {
        match unit {
            PatternUnit::Word(word) => {
                rendered.push_str(&format!(r"(\b{word}\b\(\d+\) {{0,1}})"));
            }
            PatternUnit::OpenGroup => {
                depth += 1;
                rendered.push('(');
            }
            PatternUnit::CloseGroup => {
                depth -= 1;
                rendered.push(')');
            }
            PatternUnit::Repeat((min, Some(max))) => {
                rendered.push_str(&format!("{{{min},{max}}}"));
            }
            PatternUnit::Repeat((min, None)) => {
                rendered.push_str(&format!("{{{min},}}"));
            }
            PatternUnit::Or => rendered.push('|'),
        }
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedGroups);
    }
    Ok(rendered)
}
