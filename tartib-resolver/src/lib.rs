//! Core resolution engine for Tartib DI.

pub mod descriptor;
pub mod error;
pub mod graph;
pub mod key;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod stack;

pub use descriptor::{ComponentDescriptor, ConstructFn, ParamSpec, ResolvedArgs};
pub use error::{ResolveError, Result};
pub use key::ComponentKey;
pub use registry::InstanceRegistry;
pub use resolver::{Resolver, prelude};
pub use source::ComponentSource;
