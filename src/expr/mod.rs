//! Postfix expressions over a function library
//!
//! An expression is a flat sequence of symbol codes read as a reverse-Polish
//! program. Most sequences produced by the encoder are not valid programs;
//! validity is only decided by the evaluator.

pub mod encode;
pub mod eval;

pub use encode::{decode, encode, Encoder};
pub use eval::{evaluate, evaluate_or, is_well_formed};

use crate::library::FunctionLibrary;
use std::fmt;

/// One symbol code, indexing a function of the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn new(code: u32) -> Self {
        Symbol(code)
    }

    pub fn code(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for Symbol {
    fn from(code: usize) -> Self {
        Symbol(code as u32)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arity class of a symbol, with its index inside that class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Nullary(usize),
    Unary(usize),
    Binary(usize),
}

impl SymbolClass {
    /// Stack operands consumed
    pub fn arity(&self) -> usize {
        match self {
            SymbolClass::Nullary(_) => 0,
            SymbolClass::Unary(_) => 1,
            SymbolClass::Binary(_) => 2,
        }
    }
}

/// How expressions are turned into text for progress lines and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// One letter per symbol, `A` for code 0
    #[default]
    Letters,
    /// Library names separated by spaces
    Names,
}

/// A postfix program
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Expression(Vec<Symbol>);

impl Expression {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Expression(symbols)
    }

    pub fn from_codes(codes: &[u32]) -> Self {
        Expression(codes.iter().copied().map(Symbol::new).collect())
    }

    /// Build an expression from library names, e.g. `["1", "1", "add"]`
    pub fn from_names(library: &FunctionLibrary, names: &[&str]) -> Option<Self> {
        names
            .iter()
            .map(|n| library.symbol(n))
            .collect::<Option<Vec<_>>>()
            .map(Expression)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, symbol: Symbol) {
        self.0.push(symbol);
    }

    /// Letter form. Codes past `Z` have no letter and are written `{code}`.
    pub fn to_letters(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for symbol in &self.0 {
            match u8::try_from(symbol.code()) {
                Ok(code) if code < 26 => out.push((b'A' + code) as char),
                _ => out.push_str(&format!("{{{}}}", symbol.code())),
            }
        }
        out
    }

    /// Space separated library names. Unknown codes fall back to `#code`.
    pub fn to_names(&self, library: &FunctionLibrary) -> String {
        self.0
            .iter()
            .map(|s| match library.name_of(*s) {
                Some(name) => name.to_string(),
                None => s.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self, library: &FunctionLibrary, rendering: Rendering) -> String {
        match rendering {
            Rendering::Letters => self.to_letters(),
            Rendering::Names => self.to_names(library),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_letters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        let expr = Expression::from_codes(&[1, 1, 5]);
        assert_eq!(expr.to_letters(), "BBF");
        assert_eq!(format!("{}", expr), "BBF");
    }

    #[test]
    fn test_letters_past_alphabet() {
        let expr = Expression::from_codes(&[0, 25, 26, 300]);
        assert_eq!(expr.to_letters(), "AZ{26}{300}");
    }

    #[test]
    fn test_names() {
        let lib = FunctionLibrary::standard();
        let expr = Expression::from_names(&lib, &["pi", "sqrt", "e", "mul"]).unwrap();
        assert_eq!(expr.symbols(), Expression::from_codes(&[2, 4, 3, 7]).symbols());
        assert_eq!(expr.to_names(&lib), "pi sqrt e mul");
        assert_eq!(expr.render(&lib, Rendering::Letters), "CEDH");
    }

    #[test]
    fn test_from_names_unknown() {
        let lib = FunctionLibrary::arithmetic();
        assert!(Expression::from_names(&lib, &["1", "sqrt"]).is_none());
    }
}
