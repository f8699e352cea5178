//! Constructor descriptors.
//!
//! A [`ComponentDescriptor`] is the statically-declared shape of a
//! component's constructor: its parameter list, in declaration order, and
//! a closure that performs the actual construction once every parameter
//! has a value. Descriptors are the only thing a component has to supply
//! to participate in resolution; the engine never inspects types at
//! runtime.
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use tartib_resolver::descriptor::ComponentDescriptor;
//!
//! struct Database { url: String }
//! struct UserRepo { db: Arc<Database> }
//!
//! let repo = ComponentDescriptor::new::<UserRepo>(|args| {
//!     Ok(UserRepo { db: args.shared(0)? })
//! })
//! .dependency::<Database>("db");
//!
//! assert_eq!(repo.params().len(), 1);
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{ResolveError, Result};
use crate::key::ComponentKey;

/// Type alias for construct closures.
///
/// Receives the completed argument list and returns the type-erased
/// instance. `Arc` so the resolution context can hold it while the
/// descriptor table is borrowed elsewhere.
pub type ConstructFn =
    Arc<dyn Fn(&ResolvedArgs<'_>) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// A default value for a literal parameter, shared into the argument list
/// verbatim.
pub(crate) type LiteralValue = Arc<dyn Any + Send + Sync>;

/// One constructor parameter: a name, a declared type, and optionally a
/// default value.
///
/// Classification against the candidate set happens later, during
/// metadata extraction: a parameter whose declared type is itself a
/// registered component is a dependency parameter; otherwise its default
/// is used; otherwise the run fails.
pub struct ParamSpec {
    pub(crate) name: &'static str,
    pub(crate) declared: ComponentKey,
    pub(crate) default: Option<LiteralValue>,
}

impl ParamSpec {
    /// The parameter's name as given in the descriptor.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The parameter's declared type.
    #[inline]
    pub fn declared(&self) -> &ComponentKey {
        &self.declared
    }

    /// Whether the parameter carries a default value.
    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// The constructor descriptor for one component type.
///
/// Built fluently: [`new`](ComponentDescriptor::new) names the component
/// type and its construct closure, then [`dependency`] and [`literal`]
/// append parameters in constructor order.
///
/// [`dependency`]: ComponentDescriptor::dependency
/// [`literal`]: ComponentDescriptor::literal
pub struct ComponentDescriptor {
    pub(crate) key: ComponentKey,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) construct: ConstructFn,
}

impl ComponentDescriptor {
    /// Creates a descriptor for component type `T`.
    ///
    /// The closure is called at most once per run, after every parameter
    /// in the argument list has a value.
    pub fn new<T: Send + Sync + 'static>(
        construct: impl Fn(&ResolvedArgs<'_>) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: ComponentKey::of::<T>(),
            params: Vec::new(),
            construct: Arc::new(move |args| {
                Ok(Box::new(construct(args)?) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// Appends a dependency parameter of declared type `D`.
    ///
    /// `D` must end up in the candidate set of the run, or resolution
    /// fails with a missing-dependency error.
    pub fn dependency<D: ?Sized + 'static>(mut self, name: &'static str) -> Self {
        self.params.push(ParamSpec {
            name,
            declared: ComponentKey::of::<D>(),
            default: None,
        });
        self
    }

    /// Appends a parameter with a default value.
    ///
    /// The default is used verbatim unless `V` is itself a registered
    /// component, in which case the built instance is injected and the
    /// default goes unused.
    pub fn literal<V: Send + Sync + 'static>(mut self, name: &'static str, default: V) -> Self {
        self.params.push(ParamSpec {
            name,
            declared: ComponentKey::of::<V>(),
            default: Some(Arc::new(default) as LiteralValue),
        });
        self
    }

    /// The component type this descriptor constructs.
    #[inline]
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// The declared parameters, in constructor order.
    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("key", &self.key)
            .field("params", &self.params)
            .finish()
    }
}

// ═══════════════════════════════════════════
// ResolvedArgs
// ═══════════════════════════════════════════

/// Positional, type-checked access to a completed argument list.
///
/// Passed to the construct closure once every slot holds a value:
/// dependency slots hold the shared instance built earlier in the run,
/// literal slots hold the declared default.
pub struct ResolvedArgs<'a> {
    pub(crate) owner: &'a ComponentKey,
    pub(crate) slots: &'a [Arc<dyn Any + Send + Sync>],
}

impl ResolvedArgs<'_> {
    /// The component being constructed.
    #[inline]
    pub fn owner(&self) -> &ComponentKey {
        self.owner
    }

    /// Number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the constructor takes no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the argument at `index` as a shared handle.
    ///
    /// This is how dependency parameters are taken: every dependent
    /// receives a handle to the same instance.
    pub fn shared<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>> {
        let slot = self
            .slots
            .get(index)
            .ok_or_else(|| self.argument_error(index, "no parameter at this position"))?;

        slot.clone().downcast::<T>().map_err(|_| {
            self.argument_error(index, &format!("expected {}", type_name::<T>()))
        })
    }

    /// Returns a clone of the argument at `index`.
    ///
    /// The usual accessor for literal parameters of plain value types.
    pub fn value<T: Clone + Send + Sync + 'static>(&self, index: usize) -> Result<T> {
        Ok((*self.shared::<T>(index)?).clone())
    }

    fn argument_error(&self, index: usize, detail: &str) -> ResolveError {
        ResolveError::construction(
            self.owner.clone(),
            format!("argument {index}: {detail}"),
        )
    }
}
