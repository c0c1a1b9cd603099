use crate::parser::{
    ast::{expr::Expr, literal::Literal},
    fmt::{fmt_power, Latex},
    op::{BinOp, BinOpKind},
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two operands joined by an operator, such as `x + 1` or `2x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,

    /// The span from the start of `lhs` to the end of `rhs`.
    pub span: Range<usize>,
}

impl Binary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Whether this implicit product can be written without the `*`, as in `2x` or `3(x + 1)`,
    /// and still read back the same way.
    fn juxtaposes(&self) -> bool {
        if !matches!(&*self.lhs, Expr::Literal(literal) if literal.is_numeric()) {
            return false;
        }

        // `2e1` and `2exp(x)` would lex as a float
        let starts_with_e = |name: &str| name.starts_with(['e', 'E']);
        match self.rhs.leftmost() {
            Expr::Paren(_) => true,
            Expr::Literal(Literal::Symbol(sym)) => !starts_with_e(&sym.name),
            Expr::Call(call) => !starts_with_e(&call.name.name),
            _ => false,
        }
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (lhs, rhs) = (&self.lhs, &self.rhs);
        match self.op.kind {
            BinOpKind::Add => write!(f, "{} + {}", lhs, rhs),
            BinOpKind::Sub => write!(f, "{} - {}", lhs, rhs),
            BinOpKind::Mul if self.op.implicit && self.juxtaposes() => write!(f, "{}{}", lhs, rhs),
            BinOpKind::Mul => write!(f, "{}*{}", lhs, rhs),
            BinOpKind::Div => write!(f, "{}/{}", lhs, rhs),
            BinOpKind::Exp => write!(f, "{}^{}", lhs, rhs),
        }
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = match self.op.kind {
            BinOpKind::Exp => return fmt_power(f, &self.lhs, &self.rhs),
            BinOpKind::Div => {
                // the fraction bar groups both sides already
                return write!(
                    f,
                    "\\frac{{{}}}{{{}}}",
                    self.lhs.innermost().as_display(),
                    self.rhs.innermost().as_display(),
                );
            },
            BinOpKind::Mul if self.op.implicit => "",
            BinOpKind::Mul => " \\cdot ",
            BinOpKind::Add => " + ",
            BinOpKind::Sub => " - ",
        };

        self.lhs.fmt_latex(f)?;
        f.write_str(separator)?;
        self.rhs.fmt_latex(f)
    }
}
