//! Prelude module for gotcha_day crate.
//!
//! Re-exports the derive macros from derive_more used across the crate.

pub use derive_more::Display;
