//! Macro for wrapping one process-wide container in a named module.

/// Creates a module owning a single process-wide [`Container`](crate::Container).
///
/// The container lifecycle is construct-once: the generated `init` builds the
/// container from a configuration snapshot on its first call and ignores the
/// snapshot on later calls. The module exposes ergonomic free functions that
/// delegate to the wrapped container.
///
/// # Examples
///
/// ```rust
/// use service_container::{define_container, ContainerConfig};
/// use std::sync::Arc;
///
/// define_container!(app);
///
/// app::init(
///     ContainerConfig::new()
///         .service("banner", "service-container".to_string())
///         .alias("name", "banner"),
/// );
///
/// let banner: Arc<String> = app::get_as("name").unwrap();
/// assert_eq!(&*banner, "service-container");
/// assert!(app::has("banner"));
/// ```
///
/// # Multiple Containers
///
/// Each invocation creates an isolated container:
///
/// ```rust
/// use service_container::{define_container, ContainerConfig};
///
/// define_container!(web);
/// define_container!(worker);
///
/// web::init(ContainerConfig::new().service("role", "web".to_string()));
/// worker::init(ContainerConfig::new().service("role", "worker".to_string()));
///
/// assert_eq!(*web::get_as::<String>("role").unwrap(), "web");
/// assert_eq!(*worker::get_as::<String>("role").unwrap(), "worker");
/// ```
#[macro_export]
macro_rules! define_container {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, OnceLock};

            // The wrapped container (module-private).
            static CONTAINER: OnceLock<$crate::Container> = OnceLock::new();

            /// Build the container from `config` on first call.
            ///
            /// Later calls return the already-built container and drop their
            /// snapshot.
            pub fn init(config: $crate::ContainerConfig) -> &'static $crate::Container {
                CONTAINER.get_or_init(|| $crate::Container::new(config))
            }

            /// Access the wrapped container.
            ///
            /// # Panics
            ///
            /// Panics if `init` has not been called yet.
            pub fn instance() -> &'static $crate::Container {
                CONTAINER
                    .get()
                    .expect("container is not initialized; call init() first")
            }

            /// Resolve an identifier to a type-erased instance.
            pub fn get(id: &str) -> Result<$crate::Instance, $crate::ContainerError> {
                instance().get(id)
            }

            /// Resolve an identifier and downcast it to `T`.
            pub fn get_as<T: std::any::Any + Send + Sync>(
                id: &str,
            ) -> Result<Arc<T>, $crate::ContainerError> {
                instance().get_as::<T>(id)
            }

            /// Resolve an identifier and return an owned clone of the `T` instance.
            pub fn get_cloned<T: std::any::Any + Send + Sync + Clone>(
                id: &str,
            ) -> Result<T, $crate::ContainerError> {
                instance().get_cloned::<T>(id)
            }

            /// Whether any local source matches the identifier.
            pub fn has(id: &str) -> bool {
                instance().has(id)
            }

            /// Attach a fallback resolver, replacing any previous one.
            pub fn set_fallback(resolver: impl $crate::FallbackResolver + 'static) {
                instance().set_fallback(resolver);
            }

            /// Detach the fallback resolver.
            pub fn clear_fallback() {
                instance().clear_fallback();
            }
        }
    };
}
