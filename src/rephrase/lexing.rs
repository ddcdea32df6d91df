//! Lexer
//!
//!     Classification is total: every character of the input either belongs
//!     to a declared lexical rule or ends up in an Unmatched fragment
//!     (kept or suppressed per configuration). Tokenization never fails.
//!
//! Structure:
//!     Each declared rule contributes one named branch to a single
//!     alternation regex, in declaration order. The regex crate's
//!     leftmost-first alternation makes declaration order the priority
//!     among branches that could match at the same position. The branch
//!     that produced a match is identified by named-group participation
//!     and its converter builds the token (or discards the fragment).
//!
//! Results are memoized per input string for the lexer's lifetime; the
//! cache is append-only and safe to share across concurrent callers.

pub mod lexer;
pub mod token_rule;

pub use lexer::{LexError, Lexer};
pub use token_rule::{Convert, TokenRule};
