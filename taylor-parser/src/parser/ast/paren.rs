use crate::parser::{ast::expr::Expr, fmt::Latex};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression in parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    pub expr: Box<Expr>,

    /// The span from the opening to the closing parenthesis, both included.
    pub span: Range<usize>,
}

impl Paren {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Strips this and any directly nested parentheses.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }

    pub fn into_innermost(self) -> Expr {
        self.expr.into_innermost()
    }
}

impl std::fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\left({}\\right)", self.expr.as_display())
    }
}
