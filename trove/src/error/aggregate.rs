//! Several registration failures reported as one.

use std::{error::Error, fmt, slice, sync::Arc};

use super::TroveError;

/// Every [`TroveError`] a builder found before giving up.
///
/// Manager and trove builders validate all of their registrations and report
/// the violations together instead of stopping at the first.
///
/// # Examples
///
/// ```
/// use trove::TroveError;
///
/// let err = TroveError::try_aggregate(vec![
///     TroveError::DuplicateKey { key: "a".into(), base: "dyn Shape" },
///     TroveError::EmptyKeyLocation { base: "dyn Shape" },
/// ]);
/// let Some(TroveError::Aggregate(found)) = err else {
///     panic!("two errors aggregate");
/// };
/// assert_eq!(found.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<TroveError>>);

type Unwrapped<'a> = fn(&'a Arc<TroveError>) -> &'a TroveError;

impl AggregatedErrors {
    /// Collect `errors`, keeping their order.
    #[must_use]
    pub const fn new(errors: Vec<Arc<TroveError>>) -> Self {
        Self(errors)
    }

    /// The collected errors in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &TroveError> {
        self.into_iter()
    }

    /// Number of collected errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut position = 0_usize;
        for error in self {
            position = position.saturating_add(1);
            if position > 1 {
                f.write_str("\n")?;
            }
            write!(f, "{position}: {error}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a TroveError;
    type IntoIter = std::iter::Map<slice::Iter<'a, Arc<TroveError>>, Unwrapped<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}
