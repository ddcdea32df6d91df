//! Testing utilities
//!
//! Fixture lexers and grammars shared by unit and integration tests, so
//! test files exercise the same vetted configurations instead of each
//! assembling their own slightly-wrong variant.

pub mod factories;
