//! # rephrase
//!
//! A declarative token-rewriting parser for small text DSLs.
//!
//! Instead of hand-writing a recursive-descent parser, you declare lexical
//! rules and production rules; the engine lexes text into typed tokens and
//! rewrites the token sequence until it collapses into a single result.
//!
//! See the [rephrase] module for the full overview.

pub mod rephrase;
