//! Parsing by rewriting
//!
//!     A grammar applies its rules in declaration order, each to its own
//!     fixpoint, over the whole sentence. One rule's step serializes the
//!     sentence into the matching alphabet, runs the compiled pattern,
//!     decodes the matched span back into token positions, combines the
//!     captured tokens into one new token, and splices it over the span.
//!
//! Grammar parse order is significant: earlier rules act as higher-priority
//! productions (the calculator fixture declares `/ * - +` in that order).

pub mod common;
pub mod grammar;
pub mod pattern;
pub mod rule;

pub use common::ParseError;
pub use grammar::Grammar;
pub use pattern::{Pattern, PatternError};
pub use rule::{Combine, RewriteRule, MAX_REWRITES};
