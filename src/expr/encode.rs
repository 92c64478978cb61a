//! Mapping from enumeration indices to expressions
//!
//! Index `n` is written as base-`b` digits, least significant first, and
//! each digit becomes the symbol with that code. Index 0 is the single
//! symbol 0 (the first nullary function).

use crate::expr::{Expression, Symbol};
use crate::library::FunctionLibrary;

/// Expand `index` into symbols using `base` as the radix.
pub fn encode(index: u64, base: u64) -> Expression {
    debug_assert!(base >= 2, "encoding base must be at least 2");

    if index == 0 {
        return Expression::new(vec![Symbol::new(0)]);
    }

    let mut expr = Expression::new(Vec::with_capacity(digit_count(index, base)));
    let mut n = index;
    while n > 0 {
        expr.push(Symbol::new((n % base) as u32));
        n /= base;
    }
    expr
}

/// Inverse of [`encode`]: read the symbols back as base-`base` digits.
///
/// Returns `None` if the value does not fit in a `u64`.
pub fn decode(expr: &Expression, base: u64) -> Option<u64> {
    expr.symbols()
        .iter()
        .rev()
        .try_fold(0u64, |acc, s| acc.checked_mul(base)?.checked_add(s.code() as u64))
}

fn digit_count(mut n: u64, base: u64) -> usize {
    let mut count = 0;
    while n > 0 {
        count += 1;
        n /= base;
    }
    count.max(1)
}

/// Encoder bound to one function library, using the library size as base
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    base: u64,
}

impl Encoder {
    pub fn new(library: &FunctionLibrary) -> Self {
        Self::with_base(library.len() as u64)
    }

    pub fn with_base(base: u64) -> Self {
        // A one-symbol library still needs a radix that terminates.
        Self { base: base.max(2) }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn encode(&self, index: u64) -> Expression {
        encode(index, self.base)
    }

    pub fn decode(&self, expr: &Expression) -> Option<u64> {
        decode(expr, self.base)
    }
}
