//! Trait-based conversions between external error types and `TroveError`.

use figment::Error as FigmentError;

use super::TroveError;

impl From<FigmentError> for TroveError {
    fn from(e: FigmentError) -> Self {
        Self::Load(Box::new(e))
    }
}
