//! # The Resolver — heart of Tartib
//!
//! Consumes a set of constructor descriptors, builds every component
//! exactly once in dependency order, and returns the instance registry.
//!
//! # Architecture
//! ```text
//! Resolver ──register()──> Resolver ──resolve()──> InstanceRegistry
//!                                        │
//!                          metadata → graph → DFS build
//! ```
//!
//! Resolution is all-or-nothing: the first missing dependency or cycle
//! aborts the run with no partial result. Every run owns its own graph,
//! metadata table, registry, and traversal stack; nothing persists
//! between runs.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use tartib_resolver::prelude::*;
//!
//! struct Database { url: String }
//! struct UserService { db: Arc<Database> }
//!
//! let registry = Resolver::new()
//!     .register(
//!         ComponentDescriptor::new::<Database>(|args| {
//!             Ok(Database { url: args.value(0)? })
//!         })
//!         .literal("url", String::from("postgres://localhost")),
//!     )
//!     .register(
//!         ComponentDescriptor::new::<UserService>(|args| {
//!             Ok(UserService { db: args.shared(0)? })
//!         })
//!         .dependency::<Database>("db"),
//!     )
//!     .resolve()
//!     .expect("resolution failed");
//!
//! let service: Arc<UserService> = registry.get().expect("resolved");
//! assert_eq!(service.db.url, "postgres://localhost");
//! ```

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, trace, warn};

use crate::descriptor::{ComponentDescriptor, ConstructFn, ResolvedArgs};
use crate::error::{DependencyCycleError, DuplicateComponentError, ResolveError, Result};
use crate::graph::{DependencyGraph, NodeId};
use crate::key::ComponentKey;
use crate::metadata::{self, ArgSlot, ComponentMetadata};
use crate::registry::InstanceRegistry;
use crate::source::ComponentSource;
use crate::stack::TraversalStack;

// ═══════════════════════════════════════════
// Resolver
// ═══════════════════════════════════════════

/// Collects descriptors, then resolves them in one shot.
///
/// Registration order is kept: it decides which error surfaces first when
/// several are possible, and nothing else. The success result is the same
/// mapping whatever the order.
pub struct Resolver {
    descriptors: Vec<ComponentDescriptor>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Registers one component descriptor.
    pub fn register(mut self, descriptor: ComponentDescriptor) -> Self {
        trace!(component = %descriptor.key(), "Registered descriptor");
        self.descriptors.push(descriptor);
        self
    }

    /// Registers every descriptor a [`ComponentSource`] contributes.
    pub fn load(mut self, source: &dyn ComponentSource) -> Self {
        debug!(source = source.name(), "Loading component source");
        for descriptor in source.components() {
            self = self.register(descriptor);
        }
        self
    }

    /// Runs resolution to completion.
    ///
    /// Phases: candidate dedup, metadata extraction, graph assembly, then
    /// a post-order depth-first build of every candidate. Consumes the
    /// resolver; the per-run state is dropped when this returns.
    ///
    /// # Errors
    /// - [`ResolveError::DuplicateComponent`] — two descriptors for a type
    /// - [`ResolveError::MissingDependency`] — unsatisfiable parameter
    /// - [`ResolveError::DependencyCycle`] — cycle on the build path
    /// - [`ResolveError::ConstructionFailed`] — a construct closure failed
    #[instrument(skip(self), name = "resolution")]
    pub fn resolve(self) -> Result<InstanceRegistry> {
        info!(candidates = self.descriptors.len(), "Starting resolution");

        let mut order: Vec<ComponentKey> = Vec::with_capacity(self.descriptors.len());
        let mut candidates: HashSet<ComponentKey> =
            HashSet::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            if !candidates.insert(descriptor.key().clone()) {
                return Err(ResolveError::DuplicateComponent(DuplicateComponentError {
                    key: descriptor.key().clone(),
                }));
            }
            order.push(descriptor.key().clone());
        }

        let mut table: HashMap<ComponentKey, ComponentMetadata> =
            HashMap::with_capacity(order.len());
        let mut constructors: HashMap<ComponentKey, ConstructFn> =
            HashMap::with_capacity(order.len());
        for descriptor in &self.descriptors {
            let meta = metadata::extract(descriptor, &candidates)?;
            table.insert(descriptor.key().clone(), meta);
            constructors.insert(descriptor.key().clone(), descriptor.construct.clone());
        }

        let graph = DependencyGraph::assemble(&table, &order);

        let mut run = Resolution {
            graph,
            metadata: table,
            constructors,
            instances: InstanceRegistry::new(),
            stack: TraversalStack::new(),
        };

        // Every candidate is a start point; already-built nodes return
        // immediately, so disconnected subgraphs all get covered.
        let nodes: Vec<NodeId> = run.graph.ids().collect();
        for node in nodes {
            run.visit(node)?;
        }

        info!(built = run.instances.len(), "Resolution complete");
        Ok(run.instances)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registered", &self.descriptors.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Resolution (per-run context)
// ═══════════════════════════════════════════

/// Everything one run owns. Created by [`Resolver::resolve`], dropped when
/// it returns; no state survives into another run.
struct Resolution {
    graph: DependencyGraph,
    metadata: HashMap<ComponentKey, ComponentMetadata>,
    constructors: HashMap<ComponentKey, ConstructFn>,
    instances: InstanceRegistry,
    stack: TraversalStack,
}

impl Resolution {
    /// Depth-first, post-order build of `node` and everything under it.
    ///
    /// Children are visited in declared dependency order, so by the time
    /// a node is constructed every one of its dependencies is in the
    /// registry. Stack membership, not a visited set, is the cycle check:
    /// a finished node reached again from another branch is simply
    /// skipped by the registry lookup.
    fn visit(&mut self, node: NodeId) -> Result<()> {
        let key = self.graph.key(node).clone();

        if self.instances.contains(&key) {
            return Ok(());
        }

        if self.stack.contains(&key) {
            let mut chain = self.stack.path_from(&key);
            chain.push(key);
            warn!(chain = ?chain, "Dependency cycle detected");
            return Err(ResolveError::DependencyCycle(DependencyCycleError {
                chain,
            }));
        }

        self.stack.push(key.clone());

        let children = self.graph.children(node).to_vec();
        for child in children {
            self.visit(child)?;
        }

        self.construct(&key)?;
        self.stack.pop();
        Ok(())
    }

    /// Fills the argument template from the registry and constructs `key`.
    fn construct(&mut self, key: &ComponentKey) -> Result<()> {
        let meta = self.metadata.get(key).ok_or_else(|| {
            ResolveError::construction(key.clone(), "no metadata for component")
        })?;

        let mut slots: Vec<Arc<dyn Any + Send + Sync>> =
            Vec::with_capacity(meta.template.len());
        for slot in &meta.template {
            match slot {
                ArgSlot::Literal(value) => slots.push(value.clone()),
                ArgSlot::Pending(dependency) => {
                    let instance = self.instances.get_by_key(dependency).ok_or_else(|| {
                        ResolveError::construction(
                            key.clone(),
                            format!("dependency {dependency} missing from the registry"),
                        )
                    })?;
                    slots.push(instance.clone());
                }
            }
        }

        let construct = self.constructors.get(key).cloned().ok_or_else(|| {
            ResolveError::construction(key.clone(), "no constructor for component")
        })?;

        let args = ResolvedArgs {
            owner: key,
            slots: &slots,
        };
        let instance = (construct)(&args)?;
        trace!(component = %key, "Constructed component");

        self.instances.put(key.clone(), Arc::from(instance))
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::Resolver;
    pub use crate::descriptor::{ComponentDescriptor, ResolvedArgs};
    pub use crate::error::{ResolveError, Result};
    pub use crate::key::ComponentKey;
    pub use crate::registry::InstanceRegistry;
    pub use crate::source::ComponentSource;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
