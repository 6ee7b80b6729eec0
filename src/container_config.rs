//! Configuration snapshot consumed by [`Container::new`](crate::Container::new).
//!
//! The builder converts every typed registration into a type-erased entry once,
//! at registration time. There is no runtime reflection: a "factory type" or
//! "invokable type" is recorded as a zero-argument constructor closure plus its
//! type name for diagnostics.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{BoxError, Container, Instance, ServiceFactory};

/// A registered factory: either a directly invocable value, or a
/// zero-argument-constructible factory type whose fresh instance is invoked
/// per construction event.
#[derive(Clone)]
pub(crate) enum FactoryEntry {
    Callable(Arc<dyn ServiceFactory>),
    Constructed {
        type_name: &'static str,
        construct: Arc<dyn Fn() -> Box<dyn ServiceFactory> + Send + Sync>,
    },
}

/// A registered invokable: a zero-argument constructor producing the instance
/// directly.
#[derive(Clone)]
pub(crate) struct InvokableEntry {
    pub(crate) type_name: &'static str,
    pub(crate) construct: Arc<dyn Fn() -> Instance + Send + Sync>,
}

/// Immutable configuration bundle for a [`Container`].
///
/// Five sections, each a mapping keyed by identifier string: `factories`,
/// `services`, `invokables`, `aliases` and `shared`, plus the
/// [`default_shared`](ContainerConfig::default_shared) policy option. Absent
/// sections default to empty.
///
/// # Examples
///
/// ```
/// use service_container::{Container, ContainerConfig};
/// use std::sync::Arc;
///
/// let container = Container::new(
///     ContainerConfig::new()
///         .service("greeting", "hello".to_string())
///         .alias("hi", "greeting"),
/// );
///
/// let greeting: Arc<String> = container.get_as("hi").unwrap();
/// assert_eq!(&*greeting, "hello");
/// ```
#[derive(Clone, Default)]
pub struct ContainerConfig {
    pub(crate) factories: HashMap<String, FactoryEntry>,
    pub(crate) services: HashMap<String, Instance>,
    pub(crate) invokables: HashMap<String, InvokableEntry>,
    pub(crate) aliases: HashMap<String, String>,
    pub(crate) shared: HashMap<String, bool>,
    pub(crate) default_shared: bool,
}

impl ContainerConfig {
    /// An empty configuration. Instances built from it are not shared unless
    /// flagged, see [`default_shared`](ContainerConfig::default_shared).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory closure for `id`.
    ///
    /// The closure is invoked with `(container, id)` on every construction
    /// event; `id` is the identifier after alias substitution.
    pub fn factory<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Container, &str) -> Result<Instance, BoxError> + Send + Sync + 'static,
    {
        self.factories
            .insert(id.into(), FactoryEntry::Callable(Arc::new(factory)));
        self
    }

    /// Register a [`ServiceFactory`] value for `id`.
    ///
    /// Equivalent to [`factory`](ContainerConfig::factory) for callers that
    /// implement the trait on a dedicated type.
    pub fn factory_value<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: ServiceFactory + 'static,
    {
        self.factories
            .insert(id.into(), FactoryEntry::Callable(Arc::new(factory)));
        self
    }

    /// Register a zero-argument-constructible factory type for `id`.
    ///
    /// Every construction event default-constructs a fresh `F` and invokes it
    /// with `(container, id)`; the instance is whatever the factory returns.
    pub fn factory_type<F>(mut self, id: impl Into<String>) -> Self
    where
        F: ServiceFactory + Default + 'static,
    {
        self.factories.insert(
            id.into(),
            FactoryEntry::Constructed {
                type_name: std::any::type_name::<F>(),
                construct: Arc::new(|| Box::new(F::default())),
            },
        );
        self
    }

    /// Register a pre-built instance for `id`.
    ///
    /// Services are eager singletons: `get` returns the same instance on every
    /// call, without consulting the shared flags or the instance cache.
    pub fn service<T: Send + Sync + 'static>(self, id: impl Into<String>, value: T) -> Self {
        self.service_arc(id, Arc::new(value))
    }

    /// Register an already `Arc`-wrapped instance for `id`.
    ///
    /// Avoids an extra allocation when the caller holds an `Arc`.
    pub fn service_arc<T: Send + Sync + 'static>(
        mut self,
        id: impl Into<String>,
        value: Arc<T>,
    ) -> Self {
        self.services.insert(id.into(), value);
        self
    }

    /// Register a zero-argument-constructible type for `id`.
    ///
    /// Every construction event calls `T::default()` and returns the new
    /// value; combine with [`shared`](ContainerConfig::shared) to cache it.
    pub fn invokable<T: Default + Send + Sync + 'static>(mut self, id: impl Into<String>) -> Self {
        self.invokables.insert(
            id.into(),
            InvokableEntry {
                type_name: std::any::type_name::<T>(),
                construct: Arc::new(|| Arc::new(T::default())),
            },
        );
        self
    }

    /// Register `alias` as another name for `target`.
    ///
    /// Exactly one substitution is performed per lookup: an alias whose target
    /// is itself an alias is not followed further, so `get` on it will look up
    /// the intermediate name literally. This single-hop rule is a deliberate
    /// limitation, not an oversight.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    /// Set the shared flag for `id` (keyed by the post-alias identifier).
    ///
    /// Shared instances are cached on first construction and reused; ids
    /// without a flag follow the [`default_shared`](ContainerConfig::default_shared)
    /// policy.
    pub fn shared(mut self, id: impl Into<String>, flag: bool) -> Self {
        self.shared.insert(id.into(), flag);
        self
    }

    /// Set the policy applied when an id carries no explicit shared flag.
    ///
    /// `false` (the builder default) treats unflagged entries as not shared;
    /// `true` caches every constructed instance. Embedding applications differ
    /// on which they expect, so the choice is an explicit option here.
    pub fn default_shared(mut self, flag: bool) -> Self {
        self.default_shared = flag;
        self
    }
}
