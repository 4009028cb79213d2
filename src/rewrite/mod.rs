//! Placeholder rewriting for cfn-sub.
//!
//! This module handles:
//! - Compiling the `prefix + name + suffix` placeholder matcher
//! - Walking a template tree and converting placeholders into `Fn::Sub` form
//! - Recording each rewrite for reporting

pub mod changes;
pub mod pattern;
pub mod rewriter;

pub use changes::ChangeLogEntry;
pub use pattern::PlaceholderPattern;
pub use rewriter::{DEFAULT_MAX_DEPTH, Rewriter, SUBSTITUTION_FUNCTION_KEY, rewrite};
