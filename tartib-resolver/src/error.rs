//! Error types for resolution runs.
//!
//! Every failure aborts the whole run: there is no retry and no partial
//! result. The two kinds a caller is expected to handle are
//! [`ResolveError::MissingDependency`] and [`ResolveError::DependencyCycle`];
//! both are startup-time configuration faults.

use std::fmt;

use tartib_support::rendering::{render_chain, shorten_type_name};

use crate::key::ComponentKey;

/// Main error type for resolution operations.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A constructor parameter has neither a known component type nor a
    /// default value.
    #[error("{}", .0)]
    MissingDependency(MissingDependencyError),

    /// A component was reached while still active on the construction path.
    #[error("{}", .0)]
    DependencyCycle(DependencyCycleError),

    /// A construct closure failed, or an argument did not downcast to the
    /// type the closure asked for.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: ComponentKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Two descriptors were registered for the same component type.
    #[error("{}", .0)]
    DuplicateComponent(DuplicateComponentError),

    /// An instance for this component was already stored this run.
    #[error("Component already constructed: {0}")]
    AlreadyConstructed(ComponentKey),
}

impl ResolveError {
    /// Builds a [`ResolveError::ConstructionFailed`] for `key`.
    ///
    /// Construct closures use this to report their own failures:
    ///
    /// ```rust,ignore
    /// ComponentDescriptor::new::<Database>(|args| {
    ///     let url: String = args.value(0)?;
    ///     Database::connect(&url)
    ///         .map_err(|e| ResolveError::construction(args.owner().clone(), e))
    /// })
    /// ```
    pub fn construction(
        key: ComponentKey,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ResolveError::ConstructionFailed {
            key,
            source: source.into(),
        }
    }
}

/// A constructor parameter that cannot be satisfied.
///
/// Raised during metadata extraction, before anything is constructed.
#[derive(Debug)]
pub struct MissingDependencyError {
    /// The component whose constructor declares the parameter.
    pub owner: ComponentKey,
    /// The parameter's name in the descriptor.
    pub parameter: &'static str,
    /// The declared type that is neither a candidate nor defaulted.
    pub missing: ComponentKey,
    /// Candidate type names similar to the missing one.
    pub suggestions: Vec<String>,
}

impl fmt::Display for MissingDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Missing dependency: parameter `{}` of {} needs {}, which is not a registered component and has no default",
            self.parameter,
            shorten_type_name(self.owner.type_name()),
            shorten_type_name(self.missing.type_name()),
        )?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {}", shorten_type_name(suggestion))?;
            }
        }

        write!(
            f,
            "\n  Hint: register a descriptor for {} or give `{}` a default value",
            shorten_type_name(self.missing.type_name()),
            self.parameter,
        )
    }
}

/// A dependency cycle, reported as the path that closed it.
///
/// The chain runs from the first occurrence of the repeated component
/// through the repeat itself, e.g. `[A, B, C, A]`.
#[derive(Debug)]
pub struct DependencyCycleError {
    pub chain: Vec<ComponentKey>,
}

impl fmt::Display for DependencyCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .chain
            .iter()
            .map(|k| shorten_type_name(k.type_name()))
            .collect();

        write!(f, "Dependency cycle detected:\n  {}", render_chain(&names))?;
        write!(f, "\n  Hint: break the cycle by restructuring one of these components")
    }
}

/// Two descriptors registered for one component type.
#[derive(Debug)]
pub struct DuplicateComponentError {
    pub key: ComponentKey,
}

impl fmt::Display for DuplicateComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component registered twice: {}\n  Hint: each component type takes exactly one descriptor per run",
            self.key,
        )
    }
}

/// Convenient Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_display() {
        let err = ResolveError::MissingDependency(MissingDependencyError {
            owner: ComponentKey::of::<Vec<u8>>(),
            parameter: "source",
            missing: ComponentKey::of::<String>(),
            suggestions: vec![],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Missing dependency"));
        assert!(msg.contains("`source`"));
        assert!(msg.contains("String"));
        assert!(msg.contains("Hint"));
    }

    #[test]
    fn missing_dependency_lists_suggestions() {
        let err = MissingDependencyError {
            owner: ComponentKey::of::<Vec<u8>>(),
            parameter: "db",
            missing: ComponentKey::of::<String>(),
            suggestions: vec!["app::Strung".to_string()],
        };

        let msg = format!("{err}");
        assert!(msg.contains("Did you mean"));
        assert!(msg.contains("Strung"));
    }

    #[test]
    fn dependency_cycle_display() {
        let err = ResolveError::DependencyCycle(DependencyCycleError {
            chain: vec![
                ComponentKey::of::<String>(),
                ComponentKey::of::<i32>(),
                ComponentKey::of::<String>(),
            ],
        });

        let msg = format!("{err}");
        assert!(msg.contains("cycle"));
        assert!(msg.contains("→"));
        assert!(msg.contains("String → i32 → String"));
    }

    #[test]
    fn construction_failed_display() {
        let err = ResolveError::construction(ComponentKey::of::<i32>(), "boom");
        let msg = format!("{err}");
        assert!(msg.contains("Failed to construct"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn duplicate_component_display() {
        let err = ResolveError::DuplicateComponent(DuplicateComponentError {
            key: ComponentKey::of::<i32>(),
        });
        assert!(format!("{err}").contains("registered twice"));
    }
}
