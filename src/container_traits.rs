//! Capability traits consumed by the container.
//!
//! Both seams are object-safe and blanket-implemented for plain closures, so
//! callers can hand the container either a dedicated type or a `Fn` with the
//! matching signature.

use crate::{BoxError, Container, ContainerError, Instance};

/// Produces a service instance on demand.
///
/// Factories receive the container itself so they can resolve their own
/// sub-dependencies, plus the identifier being resolved (after alias
/// substitution) so one factory can serve several registrations.
///
/// Errors cross the construction boundary with one rule: a
/// [`ContainerError::NotFound`] raised inside the factory (typically from a
/// missing sub-dependency) is propagated to the caller unwrapped; any other
/// error is wrapped into [`ContainerError::ConstructionFailed`] with the
/// original preserved as its cause.
pub trait ServiceFactory: Send + Sync {
    /// Build the instance registered under `id`.
    fn create(&self, container: &Container, id: &str) -> Result<Instance, BoxError>;
}

impl<F> ServiceFactory for F
where
    F: Fn(&Container, &str) -> Result<Instance, BoxError> + Send + Sync,
{
    fn create(&self, container: &Container, id: &str) -> Result<Instance, BoxError> {
        self(container, id)
    }
}

/// Last-resort resolver consulted when no local source matches an identifier.
///
/// The container treats the resolver as opaque: its result or error is
/// returned to the caller verbatim, its instances are never cached, and
/// [`Container::has`](crate::Container::has) never consults it.
pub trait FallbackResolver: Send + Sync {
    /// Resolve `id` (already alias-substituted) or decline with an error.
    fn resolve(&self, container: &Container, id: &str) -> Result<Instance, ContainerError>;
}

impl<F> FallbackResolver for F
where
    F: Fn(&Container, &str) -> Result<Instance, ContainerError> + Send + Sync,
{
    fn resolve(&self, container: &Container, id: &str) -> Result<Instance, ContainerError> {
        self(container, id)
    }
}
