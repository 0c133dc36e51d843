//! Rulesmith Domain Layer
//!
//! Core types and trait seams shared by every Rulesmith crate.
//!
//! ## Key Concepts
//!
//! - **Rule**: One extracted guideline with an identifier, statement and suggested fix
//! - **RuleSet**: The deduplicated, order-preserving output of one extraction run
//! - **LlmProvider**: The boundary to the external text-generation service
//! - **ProgressObserver**: The boundary to whatever renders pipeline progress
//!
//! ## Architecture
//!
//! This crate holds no pipeline logic. Infrastructure implementations of the
//! traits live in other crates (`rulesmith-llm`, `rulesmith-cli`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod rule;
pub mod rule_set;
pub mod traits;

// Re-exports for convenience
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use traits::{LlmProvider, NoopObserver, ProgressObserver};
