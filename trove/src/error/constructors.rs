//! Shorthand constructors for common `TroveError`s.

use std::sync::Arc;

use super::{AggregatedErrors, TroveError};

impl TroveError {
    /// Fold `errors` into one error, or `None` when there are none.
    ///
    /// A single uniquely owned error comes back as itself. A single shared
    /// error cannot be unwrapped, so it is returned as a one-element
    /// [`Self::Aggregate`], as are two or more errors.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut collected: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        match collected.len() {
            0 => None,
            1 => collected.pop().map(|only| {
                Arc::try_unwrap(only).unwrap_or_else(|shared| {
                    Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
                })
            }),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }

    /// Construct a missing-field error for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trove::TroveError;
    /// let e = TroveError::missing_field("rolls");
    /// assert_eq!(e.to_string(), "missing required field 'rolls'");
    /// ```
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::MissingField {
            field: field.into(),
        })
    }

    /// Construct a deserialization error for the value at `path`.
    #[must_use]
    pub fn deserialization(path: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Deserialization {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Construct a file error wrapped in an [`Arc`].
    #[must_use]
    pub fn file<E>(path: impl Into<camino::Utf8PathBuf>, source: E) -> Arc<Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Arc::new(Self::File {
            path: path.into(),
            source: Box::new(source),
        })
    }
}
