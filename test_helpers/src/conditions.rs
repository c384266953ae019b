//! Conditions that log each verification.
//!
//! Combinators short-circuit, so tests check which conditions actually ran.
//!
//! # Examples
//!
//! ```
//! use trove::condition;
//! use trove_test_helpers::{conditions, context};
//!
//! let (terms, log) = conditions::tracked(&[false, true]);
//! let ctx = context::seeded(0).expect("seeded context");
//! assert!(!condition::all(&terms, &ctx));
//! assert_eq!(log.verified(), vec![0]);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trove::{GenerationContext, LootCondition};

/// Shared record of verified condition indices, in call order.
#[derive(Clone, Debug, Default)]
pub struct VerificationLog(Arc<Mutex<Vec<usize>>>);

impl VerificationLog {
    /// Indices verified so far.
    #[must_use]
    pub fn verified(&self) -> Vec<usize> {
        self.0.lock().clone()
    }

    /// Number of verifications so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.lock().len()
    }
}

/// Condition with a fixed outcome that logs its index when verified.
#[derive(Clone, Debug)]
pub struct Tracked {
    index: usize,
    outcome: bool,
    log: VerificationLog,
}

impl LootCondition for Tracked {
    fn verify(&self, _context: &GenerationContext) -> bool {
        self.log.0.lock().push(self.index);
        self.outcome
    }
}

/// One tracked condition per entry of `outcomes`, sharing a log.
#[must_use]
pub fn tracked(outcomes: &[bool]) -> (Vec<Tracked>, VerificationLog) {
    let log = VerificationLog::default();
    let conditions = outcomes
        .iter()
        .enumerate()
        .map(|(index, &outcome)| Tracked {
            index,
            outcome,
            log: log.clone(),
        })
        .collect();
    (conditions, log)
}
