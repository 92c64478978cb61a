//! Evaluated expressions ranked by distance to the target

use crate::expr::Expression;
use std::cmp::Ordering;

/// An expression with its value and its error against the target
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub expression: Expression,
    pub value: f64,
    /// `|value - target|`
    pub error: f64,
}

impl Candidate {
    pub fn new(expression: Expression, value: f64, target: f64) -> Self {
        Self {
            expression,
            value,
            error: (value - target).abs(),
        }
    }

    pub fn key(&self) -> ErrorKey {
        ErrorKey(self.error)
    }
}

/// Totally ordered wrapper around an error magnitude.
///
/// Two candidates whose errors compare equal here are duplicates.
#[derive(Debug, Clone, Copy)]
pub struct ErrorKey(pub f64);

impl PartialEq for ErrorKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ErrorKey {}

impl PartialOrd for ErrorKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ErrorKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
