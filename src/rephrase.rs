//! Declarative parsing by token rewriting
//!
//!     Text is first classified into a sequence of typed tokens by the
//!     [Lexer], then repeatedly rewritten by production rules until it
//!     collapses into a single domain value. Every rule owns a pattern over
//!     token shapes and a combinator that builds one new token from the
//!     captured run.
//!
//! Structure:
//!     The engine reuses a general-purpose string matcher (the regex crate)
//!     as a structural matcher over token sequences: a sentence is rendered
//!     as text, one `Identifier(index)` word per token, and rule patterns
//!     compile into regexes over that alphabet. Matched spans are decoded
//!     back into positions, the captured tokens are combined, and the span
//!     is spliced out. See [parsing::rule] for the loop itself.
//!
//! The pipeline consists of:
//! 1. Lexical classification over an alternation regex ([lexing])
//! 2. Pattern compilation from the mini-language ([parsing::pattern])
//! 3. Fixpoint rewriting, rule by rule ([parsing::rule], [parsing::grammar])
//! 4. Builder surface that expands match policies into rule sets ([building])

pub mod building;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;

pub use building::{BuildError, GrammarBuilder, LexerBuilder, MatchPolicy};
pub use lexing::{LexError, Lexer, TokenRule};
pub use parsing::{Grammar, ParseError, Pattern, PatternError, RewriteRule};
pub use token::{Sentence, Shape, Token, Value};
