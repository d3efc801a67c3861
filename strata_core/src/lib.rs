//! Core identifiers shared across the strata runtime crates.
//!
//! Currently this is the selector interner. Selectors are the keys of every
//! method table in the runtime, so they live in their own leaf crate that
//! both the runtime model and its consumers can depend on.

pub mod selector;

pub use selector::{Selector, intern};
