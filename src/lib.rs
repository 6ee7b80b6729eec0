//! # Service Container
//!
//! A thread-safe, string-keyed service container: callers request an object by
//! identifier and the container produces it from one of several registered
//! sources, optionally caching it as a singleton.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_container::{Container, ContainerConfig};
//! use std::sync::Arc;
//!
//! let container = Container::new(
//!     ContainerConfig::new()
//!         .service("config.name", "my-app".to_string())
//!         .factory("greeter", |container, _id| {
//!             let name: Arc<String> = container.get_as("config.name")?;
//!             Ok(Arc::new(format!("hello, {name}")))
//!         })
//!         .alias("hello", "greeter")
//!         .shared("greeter", true),
//! );
//!
//! let greeting: Arc<String> = container.get_as("hello").unwrap();
//! assert_eq!(&*greeting, "hello, my-app");
//!
//! // Shared ids are cached: the same instance comes back every time.
//! let again: Arc<String> = container.get_as("greeter").unwrap();
//! assert!(Arc::ptr_eq(&greeting, &again));
//! ```
//!
//! ## Resolution Order
//!
//! A lookup performs exactly one alias substitution, then walks a fixed
//! precedence: cached instances → eager services → factories → invokables →
//! fallback resolver → [`ContainerError::NotFound`]. Instances built from
//! factories and invokables are cached when their id is shared (explicit flag,
//! or the [`ContainerConfig::default_shared`] policy).
//!
//! ## Features
//!
//! - **Thread-safe**: `get` and `has` are safe to call from multiple threads
//! - **Type-erased storage, typed access**: instances are held as
//!   `Arc<dyn Any + Send + Sync>` and recovered with [`Container::get_as`]
//! - **Two-kind error taxonomy**: "missing" ([`ContainerError::NotFound`]) is
//!   always distinguishable from "broken" ([`ContainerError::ConstructionFailed`])
//! - **Pluggable fallback**: a [`FallbackResolver`] supplied by the embedding
//!   application is consulted only when no local source matches
//!
//! ## Main Types
//!
//! - [`Container`] - the resolution registry (`get`, `get_as`, `has`)
//! - [`ContainerConfig`] - builder for the immutable configuration snapshot
//! - [`ServiceFactory`] - the factory protocol, `(container, id) -> instance`
//! - [`FallbackResolver`] - the caller-owned last-resort resolver
//! - [`define_container!`] - wraps one process-wide container in a module

mod container;
mod container_config;
mod container_error;
mod container_traits;
mod macros;

pub use container::{Container, Instance};
pub use container_config::ContainerConfig;
pub use container_error::{BoxError, ContainerError};
pub use container_traits::{FallbackResolver, ServiceFactory};
