use crate::parser::fmt::Latex;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    pub value: String,
    pub span: Range<usize>,
}

/// A number with a decimal point or an exponent, kept as written, such as `0.5` or `1e-3`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitFloat {
    pub value: String,
    pub span: Range<usize>,
}

/// A name. Names are variables, parameters and constants when used as values, and functions when
/// called.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    pub name: String,
    pub span: Range<usize>,
}

impl std::fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Latex for LitSym {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name.as_str() {
            // greek letters take a trailing space, so that `\pi x` does not become `\pix`
            "tau" | "pi" | "phi" | "theta" => write!(f, "\\{} ", self.name),
            name => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Integer(LitInt),
    Float(LitFloat),
    Symbol(LitSym),
}

impl Literal {
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(LitInt { span, .. })
            | Literal::Float(LitFloat { span, .. })
            | Literal::Symbol(LitSym { span, .. }) => span.clone(),
        }
    }

    /// Returns true for integers and floats.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Literal::Symbol(_))
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(LitInt { value, .. }) | Literal::Float(LitFloat { value, .. }) => f.write_str(value),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(LitInt { value, .. }) | Literal::Float(LitFloat { value, .. }) => f.write_str(value),
            Literal::Symbol(sym) => sym.fmt_latex(f),
        }
    }
}
