//! Reference grammar for hierarchically numbered clauses.
//!
//! A reference such as `23(1)(a)(iv)` is a concatenation of one token per
//! hierarchy level, each token matching the pattern registered for its
//! level (e.g. "23", "(1)", "(a)", "(iv)").

mod level;
mod reference;

pub use level::LevelPattern;
pub use reference::ReferenceGrammar;
