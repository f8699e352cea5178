//! Constructor metadata extraction.
//!
//! Classifies each declared parameter of a descriptor against the run's
//! candidate set and produces the build-phase view of a component: which
//! types it depends on, where they sit in the argument list, and a
//! prefilled argument template. Pure function of (descriptor, candidates);
//! this is the only step that can raise a missing-dependency failure.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use tartib_support::rendering::suggest_similar;

use crate::descriptor::{ComponentDescriptor, LiteralValue};
use crate::error::{MissingDependencyError, ResolveError, Result};
use crate::key::ComponentKey;

/// One slot of the argument template.
pub(crate) enum ArgSlot {
    /// Filled from the instance registry at build time.
    Pending(ComponentKey),
    /// A declared default, used verbatim.
    Literal(LiteralValue),
}

/// The extracted view of one component's constructor.
pub(crate) struct ComponentMetadata {
    /// Dependency types, unique, in first-occurrence parameter order.
    pub dependencies: Vec<ComponentKey>,
    /// Dependency type to the index of its first parameter.
    pub positions: HashMap<ComponentKey, usize>,
    /// One slot per declared parameter.
    pub template: Vec<ArgSlot>,
}

impl fmt::Debug for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgSlot::Pending(key) => f.debug_tuple("Pending").field(key).finish(),
            ArgSlot::Literal(_) => f.debug_tuple("Literal").field(&"..").finish(),
        }
    }
}

impl fmt::Debug for ComponentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMetadata")
            .field("dependencies", &self.dependencies)
            .field("positions", &self.positions)
            .field("template", &self.template)
            .finish()
    }
}

/// Classifies every parameter of `descriptor` against `candidates`.
///
/// A parameter whose declared type is a candidate becomes a dependency,
/// even when it also carries a default. A non-candidate parameter falls
/// back to its default. A parameter with neither fails the run.
pub(crate) fn extract(
    descriptor: &ComponentDescriptor,
    candidates: &HashSet<ComponentKey>,
) -> Result<ComponentMetadata> {
    let mut dependencies = Vec::new();
    let mut positions = HashMap::new();
    let mut template = Vec::with_capacity(descriptor.params.len());

    for (index, param) in descriptor.params.iter().enumerate() {
        if candidates.contains(&param.declared) {
            if !positions.contains_key(&param.declared) {
                dependencies.push(param.declared.clone());
                positions.insert(param.declared.clone(), index);
            }
            template.push(ArgSlot::Pending(param.declared.clone()));
        } else if let Some(default) = &param.default {
            template.push(ArgSlot::Literal(default.clone()));
        } else {
            return Err(ResolveError::MissingDependency(MissingDependencyError {
                owner: descriptor.key.clone(),
                parameter: param.name,
                missing: param.declared.clone(),
                suggestions: find_suggestions(&param.declared, candidates),
            }));
        }
    }

    let literals = template
        .iter()
        .filter(|slot| matches!(slot, ArgSlot::Literal(_)))
        .count();
    debug!(
        component = %descriptor.key,
        dependencies = dependencies.len(),
        literals = literals,
        "Extracted constructor metadata"
    );

    Ok(ComponentMetadata {
        dependencies,
        positions,
        template,
    })
}

fn find_suggestions(missing: &ComponentKey, candidates: &HashSet<ComponentKey>) -> Vec<String> {
    let available: Vec<&str> = candidates.iter().map(|k| k.type_name()).collect();
    suggest_similar(missing.type_name(), &available, 3)
}
