//! String-keyed service container with singleton caching.
//!
//! Resolution walks a fixed precedence: one alias substitution, then the
//! instance cache, then eager services, then factories, then invokables, then
//! the optional fallback resolver, and finally a not-found error. The resolved
//! identifier is used for every step, including error messages.
//!
//! # Examples
//!
//! ```
//! use service_container::{Container, ContainerConfig};
//! use std::sync::Arc;
//!
//! let container = Container::new(
//!     ContainerConfig::new()
//!         .factory("greeting", |_container, id| {
//!             Ok(Arc::new(format!("hello from {id}")))
//!         })
//!         .shared("greeting", true),
//! );
//!
//! let greeting: Arc<String> = container.get_as("greeting").unwrap();
//! assert_eq!(&*greeting, "hello from greeting");
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::container_config::{ContainerConfig, FactoryEntry, InvokableEntry};
use crate::{ContainerError, FallbackResolver};

/// Type-erased service instance.
///
/// Everything the container hands out is shared behind an `Arc`, so the
/// instance cache and every caller observe the same allocation. Use
/// [`Container::get_as`] to recover the concrete type.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Thread-safe service container.
///
/// Constructed once from a [`ContainerConfig`] snapshot; the registration
/// tables are read-only afterwards. Only the instance cache and the fallback
/// resolver slot are mutable, both behind a `Mutex`.
///
/// # Concurrency
///
/// Locks guard map access only and are never held across a factory or
/// resolver invocation, so factories may resolve sub-dependencies through the
/// same container without deadlocking. The trade-off: two threads racing on a
/// shared id may both run the factory, after which the first instance
/// published to the cache wins and is what every caller returns. Factories
/// with side effects that must run at most once need external coordination.
pub struct Container {
    factories: HashMap<String, FactoryEntry>,
    services: HashMap<String, Instance>,
    invokables: HashMap<String, InvokableEntry>,
    aliases: HashMap<String, String>,
    shared: HashMap<String, bool>,
    default_shared: bool,
    instances: Mutex<HashMap<String, Instance>>,
    fallback: Mutex<Option<Arc<dyn FallbackResolver>>>,
}

impl Container {
    /// Build a container from a configuration snapshot.
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            factories: config.factories,
            services: config.services,
            invokables: config.invokables,
            aliases: config.aliases,
            shared: config.shared,
            default_shared: config.default_shared,
            instances: Mutex::new(HashMap::new()),
            fallback: Mutex::new(None),
        }
    }

    /// Resolve `id` to an instance.
    ///
    /// Identifiers are looked up literally after a single alias substitution.
    /// Cached instances and eager services are returned as-is; otherwise the
    /// instance is constructed from the first matching source in the fixed
    /// order factories → invokables → fallback resolver. Instances built from
    /// factories and invokables are cached when the id is shared; whatever the
    /// fallback resolver returns is passed through untouched, errors included.
    ///
    /// # Errors
    ///
    /// [`ContainerError::NotFound`] when no source matches the resolved id,
    /// [`ContainerError::ConstructionFailed`] when a factory failed while
    /// building the entry (the factory's own error is kept as the cause).
    pub fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        let id = self.resolve_alias(id);

        if let Some(cached) = self.cached_instance(id) {
            trace!(id, "returning cached instance");
            return Ok(cached);
        }
        if let Some(service) = self.services.get(id) {
            trace!(id, "returning eager service");
            return Ok(service.clone());
        }

        let instance = if let Some(entry) = self.factories.get(id) {
            self.create_from_factory(entry, id)?
        } else if let Some(entry) = self.invokables.get(id) {
            debug!(id, type_name = entry.type_name, "constructing invokable");
            (entry.construct)()
        } else if let Some(resolver) = self.fallback_resolver() {
            // Delegated entirely: no caching, result and error pass through
            // verbatim.
            debug!(id, "delegating to fallback resolver");
            return resolver.resolve(self, id);
        } else {
            return Err(ContainerError::not_found(id));
        };

        if self.is_shared(id) {
            let mut instances = self
                .instances
                .lock()
                // Poisoning only occurs if a thread panicked while holding the
                // lock; the map itself is still valid, so recover and continue.
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // First publication wins under contention; a losing duplicate is
            // dropped so singleton identity stays stable.
            return Ok(instances.entry(id.to_string()).or_insert(instance).clone());
        }

        Ok(instance)
    }

    /// Resolve `id` and downcast it to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`get`](Container::get) returns, plus
    /// [`ContainerError::ConstructionFailed`] with a type-mismatch cause when
    /// the entry is not a `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        let effective = self.resolve_alias(id);
        let instance = self.get(id)?;
        instance.downcast::<T>().map_err(|_| {
            ContainerError::construction(
                effective,
                format!("entry is not a {}", std::any::type_name::<T>()),
            )
        })
    }

    /// Resolve `id` and return an owned clone of the `T` instance.
    ///
    /// # Errors
    ///
    /// Same as [`get_as`](Container::get_as).
    pub fn get_cloned<T: Any + Send + Sync + Clone>(&self, id: &str) -> Result<T, ContainerError> {
        let instance = self.get_as::<T>(id)?;
        Ok((*instance).clone())
    }

    /// Whether the resolved id appears in the instance cache, the services,
    /// the factories or the invokables.
    ///
    /// Never constructs anything and never consults the fallback resolver, so
    /// an id only the resolver could produce answers `false`.
    pub fn has(&self, id: &str) -> bool {
        let id = self.resolve_alias(id);

        let cached = self
            .instances
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(id);

        cached
            || self.services.contains_key(id)
            || self.factories.contains_key(id)
            || self.invokables.contains_key(id)
    }

    /// Attach a fallback resolver, replacing any previous one.
    ///
    /// The resolver is consulted only when no local source matches an id.
    pub fn set_fallback(&self, resolver: impl FallbackResolver + 'static) {
        self.set_fallback_arc(Arc::new(resolver));
    }

    /// Attach an already `Arc`-wrapped fallback resolver.
    pub fn set_fallback_arc(&self, resolver: Arc<dyn FallbackResolver>) {
        let mut guard = self
            .fallback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(resolver);
    }

    /// Detach the fallback resolver.
    pub fn clear_fallback(&self) {
        let mut guard = self
            .fallback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    /// One alias substitution, using the raw key as-is when absent.
    fn resolve_alias<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    fn cached_instance(&self, id: &str) -> Option<Instance> {
        self.instances
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    fn fallback_resolver(&self) -> Option<Arc<dyn FallbackResolver>> {
        // Clone the Arc out so the lock is not held while the resolver runs;
        // a resolver may re-enter the container.
        self.fallback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn is_shared(&self, id: &str) -> bool {
        self.shared.get(id).copied().unwrap_or(self.default_shared)
    }

    fn create_from_factory(
        &self,
        entry: &FactoryEntry,
        id: &str,
    ) -> Result<Instance, ContainerError> {
        let result = match entry {
            FactoryEntry::Callable(factory) => {
                debug!(id, "invoking factory");
                factory.create(self, id)
            }
            FactoryEntry::Constructed {
                type_name,
                construct,
            } => {
                debug!(id, type_name = *type_name, "constructing factory type");
                construct().create(self, id)
            }
        };

        result.map_err(|source| match source.downcast::<ContainerError>() {
            // NotFound crosses the boundary unwrapped so "missing" stays
            // distinguishable from "broken".
            Ok(inner) if inner.is_not_found() => *inner,
            Ok(inner) => ContainerError::construction(id, *inner),
            Err(other) => ContainerError::construction(id, other),
        })
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("factories", &self.factories.len())
            .field("services", &self.services.len())
            .field("invokables", &self.invokables.len())
            .field("aliases", &self.aliases.len())
            .field("default_shared", &self.default_shared)
            .finish_non_exhaustive()
    }
}
