//! Component identification keys.
//!
//! [`ComponentKey`] identifies a constructible component type within a
//! resolution run. It is the map key for metadata, graph nodes, and the
//! instance registry.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a component type participating in resolution.
///
/// Wraps the type's [`TypeId`] together with its human-readable name.
/// Equality and hashing use the `TypeId` alone; the name exists for
/// diagnostics.
///
/// # Examples
/// ```
/// use tartib_resolver::key::ComponentKey;
///
/// let key = ComponentKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key, ComponentKey::of::<String>());
/// ```
#[derive(Clone)]
pub struct ComponentKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ComponentKey {
    /// Creates the key for type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the component type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    ///
    /// Used in error messages.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentKey {}

impl Hash for ComponentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKey({})", self.type_name)
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn key_of_type() {
        let key = ComponentKey::of::<Widget>();
        assert!(key.type_name().contains("Widget"));
    }

    #[test]
    fn key_equality_same_type() {
        assert_eq!(ComponentKey::of::<String>(), ComponentKey::of::<String>());
    }

    #[test]
    fn key_inequality_different_types() {
        assert_ne!(ComponentKey::of::<String>(), ComponentKey::of::<i32>());
    }

    #[test]
    fn key_in_hashmap() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ComponentKey::of::<String>(), "string");
        map.insert(ComponentKey::of::<i32>(), "i32");
        assert_eq!(map.get(&ComponentKey::of::<String>()), Some(&"string"));
        assert_eq!(map.get(&ComponentKey::of::<bool>()), None);
    }

    #[test]
    fn display_is_type_name() {
        let key = ComponentKey::of::<Widget>();
        assert_eq!(format!("{key}"), key.type_name());
    }
}
