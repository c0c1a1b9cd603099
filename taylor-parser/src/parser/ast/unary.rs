use crate::parser::{ast::expr::Expr, fmt::Latex, op::{UnaryOp, UnaryOpKind}};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A signed operand, such as `-x` or `+2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    pub operand: Box<Expr>,
    pub op: UnaryOp,
    pub span: Range<usize>,
}

impl Unary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn sign(&self) -> char {
        match self.op.kind {
            UnaryOpKind::Neg => '-',
            UnaryOpKind::Pos => '+',
        }
    }
}

impl std::fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.sign(), self.operand)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sign())?;
        self.operand.fmt_latex(f)
    }
}
