//! Tetromino rules (workspace facade crate).
//!
//! Re-exports the rules engine as `tetromino_rules::{core, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tetromino_rules_core as core;
pub use tetromino_rules_types as types;
