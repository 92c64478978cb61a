//! Function library: the nullary, unary and binary scalar functions that
//! expressions are built from.
//!
//! Symbol codes are assigned by position: nullary functions first, then
//! unary, then binary. A library is immutable once built and is shared
//! read-only by every search worker.

use crate::error::LibraryError;
use crate::expr::{Symbol, SymbolClass};
use std::collections::HashSet;
use std::fmt;

pub type NullaryFn = Box<dyn Fn() -> f64 + Send + Sync>;
pub type UnaryFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;
pub type BinaryFn = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// A library function together with its display name
pub struct Named<F> {
    pub name: String,
    pub func: F,
}

/// Ordered sets of scalar functions grouped by arity
pub struct FunctionLibrary {
    nullary: Vec<Named<NullaryFn>>,
    unary: Vec<Named<UnaryFn>>,
    binary: Vec<Named<BinaryFn>>,
}

impl FunctionLibrary {
    pub fn builder() -> FunctionLibraryBuilder {
        FunctionLibraryBuilder::default()
    }

    /// The default library: four constants, square root and five
    /// arithmetic operators.
    ///
    /// The non-commutative operators take their operands in reverse so that
    /// an expression reads left to right: `a b sub` is `a - b`.
    pub fn standard() -> Self {
        Self::standard_builder().assemble()
    }

    /// Builder pre-populated with [`FunctionLibrary::standard`], so callers
    /// can append extra constants.
    pub fn standard_builder() -> FunctionLibraryBuilder {
        FunctionLibrary::builder()
            .nullary("0", || 0.0)
            .nullary("1", || 1.0)
            .nullary("pi", || 3.1415926535)
            .nullary("e", || 2.7182818284)
            .unary("sqrt", f64::sqrt)
            .binary("add", |x, y| x + y)
            .binary("sub", |x, y| y - x)
            .binary("mul", |x, y| x * y)
            .binary("div", |x, y| y / x)
            .binary("pow", |x, y| y.powf(x))
    }

    /// Smallest useful library: `0`, `1` and addition.
    pub fn arithmetic() -> Self {
        Self::arithmetic_builder().assemble()
    }

    pub fn arithmetic_builder() -> FunctionLibraryBuilder {
        FunctionLibrary::builder()
            .nullary("0", || 0.0)
            .nullary("1", || 1.0)
            .binary("add", |x, y| x + y)
    }

    pub fn nullary_count(&self) -> usize {
        self.nullary.len()
    }

    pub fn unary_count(&self) -> usize {
        self.unary.len()
    }

    pub fn binary_count(&self) -> usize {
        self.binary.len()
    }

    /// Total number of symbols (C0 + C1 + C2)
    pub fn len(&self) -> usize {
        self.nullary.len() + self.unary.len() + self.binary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arity class of a symbol code, or `None` if the code is out of range
    pub fn class_of(&self, symbol: Symbol) -> Option<SymbolClass> {
        let code = symbol.code();
        let c0 = self.nullary.len();
        let c01 = c0 + self.unary.len();
        if code < c0 {
            Some(SymbolClass::Nullary(code))
        } else if code < c01 {
            Some(SymbolClass::Unary(code - c0))
        } else if code < self.len() {
            Some(SymbolClass::Binary(code - c01))
        } else {
            None
        }
    }

    pub fn call_nullary(&self, index: usize) -> f64 {
        (self.nullary[index].func)()
    }

    pub fn call_unary(&self, index: usize, x: f64) -> f64 {
        (self.unary[index].func)(x)
    }

    pub fn call_binary(&self, index: usize, x: f64, y: f64) -> f64 {
        (self.binary[index].func)(x, y)
    }

    /// Display name of a symbol
    pub fn name_of(&self, symbol: Symbol) -> Option<&str> {
        match self.class_of(symbol)? {
            SymbolClass::Nullary(i) => Some(&self.nullary[i].name),
            SymbolClass::Unary(i) => Some(&self.unary[i].name),
            SymbolClass::Binary(i) => Some(&self.binary[i].name),
        }
    }

    /// Look up a symbol code by its display name
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.nullary
            .iter()
            .map(|n| &n.name)
            .chain(self.unary.iter().map(|n| &n.name))
            .chain(self.binary.iter().map(|n| &n.name))
            .position(|n| n == name)
            .map(Symbol::from)
    }
}

impl fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names<F>(list: &[Named<F>]) -> Vec<&str> {
            list.iter().map(|n| n.name.as_str()).collect()
        }
        f.debug_struct("FunctionLibrary")
            .field("nullary", &names(&self.nullary))
            .field("unary", &names(&self.unary))
            .field("binary", &names(&self.binary))
            .finish()
    }
}

/// Incremental constructor for [`FunctionLibrary`]
#[derive(Default)]
pub struct FunctionLibraryBuilder {
    nullary: Vec<Named<NullaryFn>>,
    unary: Vec<Named<UnaryFn>>,
    binary: Vec<Named<BinaryFn>>,
}

impl FunctionLibraryBuilder {
    pub fn nullary<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        self.nullary.push(Named {
            name: name.into(),
            func: Box::new(func),
        });
        self
    }

    pub fn unary<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.unary.push(Named {
            name: name.into(),
            func: Box::new(func),
        });
        self
    }

    pub fn binary<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.binary.push(Named {
            name: name.into(),
            func: Box::new(func),
        });
        self
    }

    /// Append a named constant
    pub fn constant(self, name: impl Into<String>, value: f64) -> Self {
        self.nullary(name, move || value)
    }

    /// Append a constant given as `NAME=VALUE`
    pub fn parse_constant(self, spec: &str) -> Result<Self, LibraryError> {
        let (name, value) = spec
            .split_once('=')
            .ok_or_else(|| LibraryError::InvalidConstant(spec.to_string()))?;
        let name = name.trim();
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| LibraryError::InvalidConstant(spec.to_string()))?;
        if name.is_empty() || !value.is_finite() {
            return Err(LibraryError::InvalidConstant(spec.to_string()));
        }
        Ok(self.constant(name, value))
    }

    pub fn build(self) -> Result<FunctionLibrary, LibraryError> {
        if self.nullary.is_empty() {
            return Err(LibraryError::NoNullary);
        }

        let mut seen = HashSet::new();
        let names = self
            .nullary
            .iter()
            .map(|n| &n.name)
            .chain(self.unary.iter().map(|n| &n.name))
            .chain(self.binary.iter().map(|n| &n.name));
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(LibraryError::DuplicateName(name.clone()));
            }
        }

        Ok(self.assemble())
    }

    // Presets are known to be well formed and skip validation.
    fn assemble(self) -> FunctionLibrary {
        FunctionLibrary {
            nullary: self.nullary,
            unary: self.unary,
            binary: self.binary,
        }
    }
}
