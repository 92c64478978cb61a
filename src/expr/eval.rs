//! Stack machine for postfix expressions
//!
//! Nullary symbols push a value, unary symbols replace the top of the stack,
//! binary symbols pop `y` (top) and `x` (below it) and push `f(x, y)`. A
//! program is valid only if no operator underflows and exactly one value is
//! left at the end.

use crate::error::EvalError;
use crate::expr::{Expression, SymbolClass};
use crate::library::FunctionLibrary;

/// Run `expr` against `library`.
pub fn evaluate(expr: &Expression, library: &FunctionLibrary) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(expr.len());

    for (position, &symbol) in expr.symbols().iter().enumerate() {
        let class = library
            .class_of(symbol)
            .ok_or(EvalError::UnknownSymbol { symbol })?;

        if stack.len() < class.arity() {
            return Err(EvalError::Underflow {
                position,
                required: class.arity(),
                depth: stack.len(),
            });
        }

        match class {
            SymbolClass::Nullary(i) => stack.push(library.call_nullary(i)),
            SymbolClass::Unary(i) => {
                if let Some(top) = stack.last_mut() {
                    *top = library.call_unary(i, *top);
                }
            }
            SymbolClass::Binary(i) => {
                if let (Some(y), Some(x)) = (stack.pop(), stack.last_mut()) {
                    *x = library.call_binary(i, *x, y);
                }
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::Unbalanced { depth: stack.len() }),
    }
}

/// Sentinel form of [`evaluate`]: any failure yields `default`.
pub fn evaluate_or(expr: &Expression, library: &FunctionLibrary, default: f64) -> f64 {
    evaluate(expr, library).unwrap_or(default)
}

/// Validity check without calling any library function.
pub fn is_well_formed(expr: &Expression, library: &FunctionLibrary) -> bool {
    let mut depth = 0usize;
    for &symbol in expr.symbols() {
        let Some(class) = library.class_of(symbol) else {
            return false;
        };
        match class {
            SymbolClass::Nullary(_) => depth += 1,
            SymbolClass::Unary(_) if depth >= 1 => {}
            SymbolClass::Binary(_) if depth >= 2 => depth -= 1,
            _ => return false,
        }
    }
    depth == 1
}
