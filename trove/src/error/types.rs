//! Primary error enum for conversion and generation flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while registering converters, converting nodes, or
/// processing generated loot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TroveError {
    /// A builder was finalised without a field it cannot default.
    #[error("{builder} builder is missing required field '{field}'")]
    MissingBuilderField {
        /// Name of the builder that rejected the build.
        builder: &'static str,
        /// Field that was never supplied.
        field: &'static str,
    },

    /// A conversion manager was configured with an empty key location.
    #[error("key location of the manager for '{base}' must not be empty")]
    EmptyKeyLocation {
        /// Base type handled by the manager.
        base: &'static str,
    },

    /// Two keyed converters share a discriminator key.
    #[error("key '{key}' is registered twice in the manager for '{base}'")]
    DuplicateKey {
        /// Offending discriminator value.
        key: String,
        /// Base type handled by the manager.
        base: &'static str,
    },

    /// Two keyed converters produce the same concrete type.
    #[error("type '{type_name}' is registered twice in the manager for '{base}'")]
    DuplicateType {
        /// Concrete type registered more than once.
        type_name: &'static str,
        /// Base type handled by the manager.
        base: &'static str,
    },

    /// A trove already holds a converter for the type.
    #[error("a converter for '{type_name}' is already registered")]
    DuplicateConverter {
        /// Type registered more than once.
        type_name: &'static str,
    },

    /// A required node field was absent.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Path of the absent field.
        field: String,
    },

    /// A node field was present but had the wrong shape.
    #[error("invalid value at '{path}': {message}")]
    Deserialization {
        /// Path of the offending field.
        path: String,
        /// Human-readable explanation of the mismatch.
        message: String,
    },

    /// No keyed converter is registered for a discriminator value.
    #[error("unknown key '{key}' for '{base}'")]
    UnknownKey {
        /// Discriminator value read from the node.
        key: String,
        /// Base type handled by the manager.
        base: &'static str,
    },

    /// No keyed converter is registered for a runtime type.
    #[error("no converter handles runtime type '{type_name}' for '{base}'")]
    UnknownType {
        /// Runtime type of the value being serialized.
        type_name: &'static str,
        /// Base type handled by the manager.
        base: &'static str,
    },

    /// A context was asked to assure a value it does not hold.
    #[error("context has no value of type '{type_name}' under '{name}'")]
    MissingContextValue {
        /// Name of the requested key.
        name: String,
        /// Type requested by the key.
        type_name: &'static str,
    },

    /// A trove holds no converter for the requested type.
    #[error("no converter is registered for '{type_name}'")]
    MissingConverter {
        /// Requested type.
        type_name: &'static str,
    },

    /// A processor received an item none of its handlers accept.
    #[error("no processor handler accepts items of type '{type_name}'")]
    UnhandledItem {
        /// Runtime type of the rejected item.
        type_name: &'static str,
    },

    /// Error originating from a node file.
    #[error("node file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported while reading or parsing.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while extracting a node tree from its provider.
    #[error("failed to load node tree: {0}")]
    Load(#[from] Box<FigmentError>),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Several configuration errors found by a single build.
    #[error("{count} registration errors:\n{0}", count = .0.len())]
    Aggregate(Box<AggregatedErrors>),
}

/// Broad classification of a [`TroveError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A registry or builder invariant was violated.
    Configuration,
    /// Node content was missing or malformed.
    Deserialization,
    /// A lookup by key, type, or context name found nothing.
    Lookup,
    /// An API contract was broken by the caller.
    Usage,
    /// Reading or parsing an external source failed.
    Io,
}

impl TroveError {
    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use trove::{ErrorKind, TroveError};
    ///
    /// let err = TroveError::MissingField { field: "value".into() };
    /// assert_eq!(err.kind(), ErrorKind::Deserialization);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingBuilderField { .. }
            | Self::EmptyKeyLocation { .. }
            | Self::DuplicateKey { .. }
            | Self::DuplicateType { .. }
            | Self::DuplicateConverter { .. }
            | Self::Aggregate(_) => ErrorKind::Configuration,
            Self::MissingField { .. } | Self::Deserialization { .. } | Self::Json(_) => {
                ErrorKind::Deserialization
            }
            Self::UnknownKey { .. }
            | Self::UnknownType { .. }
            | Self::MissingContextValue { .. }
            | Self::MissingConverter { .. } => ErrorKind::Lookup,
            Self::UnhandledItem { .. } => ErrorKind::Usage,
            Self::File { .. } | Self::Load(_) => ErrorKind::Io,
        }
    }
}
