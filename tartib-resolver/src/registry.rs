//! The instance registry.
//!
//! Memoized store of constructed instances, keyed by component type. It
//! grows monotonically during a run, never shrinks, and its final state is
//! what a successful run hands back to the caller. At most one instance
//! per type: the build phase consults it before visiting a node, and
//! [`put`](InstanceRegistry::put) rejects a second store outright.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{ResolveError, Result};
use crate::key::ComponentKey;

/// Component type to shared instance, the terminal result of a run.
///
/// Instances are `Arc`-owned, so every dependent that received one during
/// construction holds the same allocation the registry does.
///
/// # Examples
/// ```rust,ignore
/// let registry = resolver.resolve()?;
/// let service: Arc<UserService> = registry.get().expect("resolved");
/// ```
pub struct InstanceRegistry {
    instances: HashMap<ComponentKey, Arc<dyn Any + Send + Sync>>,
}

impl InstanceRegistry {
    pub(crate) fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Returns the instance of `T`, if one was constructed.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&ComponentKey::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// Returns the type-erased instance for `key`.
    pub fn get_by_key(&self, key: &ComponentKey) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.instances.get(key)
    }

    /// True when an instance for `key` was already constructed.
    pub fn contains(&self, key: &ComponentKey) -> bool {
        self.instances.contains_key(key)
    }

    /// Stores the instance for `key`.
    ///
    /// # Errors
    /// [`ResolveError::AlreadyConstructed`] if `key` is present; each
    /// component is constructed at most once per run.
    pub(crate) fn put(
        &mut self,
        key: ComponentKey,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<()> {
        if self.instances.contains_key(&key) {
            return Err(ResolveError::AlreadyConstructed(key));
        }
        trace!(component = %key, "Stored instance");
        self.instances.insert(key, instance);
        Ok(())
    }

    /// Number of constructed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The keys of every constructed component.
    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.instances.keys()
    }

    /// Iterates over every (key, instance) pair.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKey, &Arc<dyn Any + Send + Sync>)> {
        self.instances.iter()
    }
}

impl fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("instances", &self.instances.len())
            .finish()
    }
}
