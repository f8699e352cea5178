//! # Tartib Support
//!
//! Shared utilities for the Tartib resolver crates.
//!
//! Currently this is the diagnostic text toolbox: chain rendering, type
//! name shortening, and "did you mean" suggestions used by the resolver's
//! error messages.

pub mod rendering;
