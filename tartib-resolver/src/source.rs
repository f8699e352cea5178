//! Component sources: where candidate types come from.
//!
//! Discovery itself (package scanning, static configuration, code
//! generation) lives outside this crate. Whatever mechanism an
//! application uses, it hands the engine descriptors through this seam:
//! a [`ComponentSource`] contributes a batch of related descriptors, and
//! [`Resolver::load`](crate::resolver::Resolver::load) pulls them in.
//!
//! # Examples
//! ```rust,ignore
//! struct StorageComponents;
//!
//! impl ComponentSource for StorageComponents {
//!     fn components(&self) -> Vec<ComponentDescriptor> {
//!         vec![
//!             ComponentDescriptor::new::<Database>(|args| { ... }),
//!             ComponentDescriptor::new::<BlobStore>(|args| { ... }),
//!         ]
//!     }
//! }
//!
//! let registry = Resolver::new().load(&StorageComponents).resolve()?;
//! ```

use crate::descriptor::ComponentDescriptor;

/// A module of related component descriptors.
///
/// Group descriptors by domain instead of funneling an application's whole
/// wiring through one registration block. Sources compose: load several
/// into one resolver and resolve once.
pub trait ComponentSource: Send + Sync {
    /// The descriptors this source contributes.
    ///
    /// Called once per resolution run.
    fn components(&self) -> Vec<ComponentDescriptor>;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;

    struct Clock {
        tick_ms: u64,
    }

    struct Scheduler {
        clock: std::sync::Arc<Clock>,
    }

    struct TimingComponents;

    impl ComponentSource for TimingComponents {
        fn components(&self) -> Vec<ComponentDescriptor> {
            vec![
                ComponentDescriptor::new::<Clock>(|args| {
                    Ok(Clock {
                        tick_ms: args.value(0)?,
                    })
                })
                .literal("tick_ms", 50u64),
                ComponentDescriptor::new::<Scheduler>(|args| {
                    Ok(Scheduler {
                        clock: args.shared(0)?,
                    })
                })
                .dependency::<Clock>("clock"),
            ]
        }
    }

    #[test]
    fn source_descriptors_resolve() {
        let registry = Resolver::new().load(&TimingComponents).resolve().unwrap();

        assert_eq!(registry.len(), 2);
        let scheduler = registry.get::<Scheduler>().unwrap();
        assert_eq!(scheduler.clock.tick_ms, 50);
    }

    #[test]
    fn source_composes_with_direct_registration() {
        struct Reporter {
            clock: std::sync::Arc<Clock>,
        }

        let registry = Resolver::new()
            .load(&TimingComponents)
            .register(
                ComponentDescriptor::new::<Reporter>(|args| {
                    Ok(Reporter {
                        clock: args.shared(0)?,
                    })
                })
                .dependency::<Clock>("clock"),
            )
            .resolve()
            .unwrap();

        let reporter = registry.get::<Reporter>().unwrap();
        let scheduler = registry.get::<Scheduler>().unwrap();
        assert!(std::sync::Arc::ptr_eq(&reporter.clock, &scheduler.clock));
    }

    #[test]
    fn source_has_a_name() {
        assert!(TimingComponents.name().contains("TimingComponents"));
    }
}
