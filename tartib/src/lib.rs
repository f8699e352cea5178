//! # Tartib: runtime dependency injection for Rust
//!
//! Describe each component's constructor once, hand the descriptors to a
//! [`Resolver`], and get back a registry holding exactly one shared
//! instance per component, built in dependency order. Cycles and
//! unsatisfiable constructors fail the whole run with a diagnostic that
//! names the offending types.

pub use tartib_resolver::*;
pub use tartib_support::*;
