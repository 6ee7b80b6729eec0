//! Error taxonomy for container lookups.
//!
//! Exactly two kinds are surfaced by [`Container::get`](crate::Container::get):
//! [`ContainerError::NotFound`] for identifiers with no matching source, and
//! [`ContainerError::ConstructionFailed`] for entries whose factory broke while
//! building them. Callers implementing optional-dependency patterns match on
//! `NotFound` and can be certain a broken factory never hides behind it.

use thiserror::Error;

/// Boxed error used as the cause of a [`ContainerError::ConstructionFailed`]
/// and as the error type of the [`ServiceFactory`](crate::ServiceFactory)
/// protocol.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by container lookups.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No source (instances, services, factories, invokables, fallback
    /// resolver) matches the requested identifier.
    #[error("service {id} not found")]
    NotFound {
        /// The identifier after alias resolution.
        id: String,
    },

    /// A factory was found for the identifier but failed while producing the
    /// instance. The original failure is preserved as [`std::error::Error::source`].
    #[error("error while retrieving the entry {id}")]
    ConstructionFailed {
        /// The identifier after alias resolution.
        id: String,
        #[source]
        source: BoxError,
    },
}

impl ContainerError {
    /// A `NotFound` error for the given identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// A `ConstructionFailed` error wrapping the underlying cause.
    pub fn construction(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ConstructionFailed {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Whether this error is the `NotFound` kind.
    ///
    /// Factory errors cross the construction boundary unwrapped when they are
    /// `NotFound`, so a factory resolving a missing sub-dependency surfaces to
    /// the caller as "missing", not "broken".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The identifier the error refers to, after alias resolution.
    pub fn id(&self) -> &str {
        match self {
            Self::NotFound { id } | Self::ConstructionFailed { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_display() {
        let err = ContainerError::not_found("db");
        assert_eq!(err.to_string(), "service db not found");
    }

    #[test]
    fn test_construction_failed_display() {
        let err = ContainerError::construction("db", "connection refused");
        assert_eq!(err.to_string(), "error while retrieving the entry db");
    }

    #[test]
    fn test_construction_failed_preserves_cause() {
        let err = ContainerError::construction("db", "connection refused");
        let cause = err.source().expect("cause should be preserved");
        assert_eq!(cause.to_string(), "connection refused");
    }

    #[test]
    fn test_not_found_has_no_cause() {
        let err = ContainerError::not_found("db");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_is_not_found() {
        assert!(ContainerError::not_found("a").is_not_found());
        assert!(!ContainerError::construction("a", "boom").is_not_found());
    }

    #[test]
    fn test_id_accessor() {
        assert_eq!(ContainerError::not_found("cache").id(), "cache");
        assert_eq!(ContainerError::construction("cache", "boom").id(), "cache");
    }
}
