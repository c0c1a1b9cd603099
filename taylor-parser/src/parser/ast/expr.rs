use crate::parser::{
    ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
    error::Error,
    fmt::Latex,
    iter::ExprIter,
    Parse,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of the syntax tree of the function text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Strips any number of enclosing parentheses, consuming the expression.
    pub fn into_innermost(self) -> Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = *paren.expr;
        }
        inner
    }

    /// Descends through the left operands of binary operations, reaching the node that is
    /// written first.
    pub fn leftmost(&self) -> &Expr {
        let mut left = self;
        while let Expr::Binary(binary) = left {
            left = &binary.lhs;
        }
        left
    }

    /// Visits every node, children before parents, left to right.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Rewrites the expression tree in pre-order. For each node, `f` may return a replacement,
    /// which is used as-is without being visited further. Otherwise, the node's children are
    /// rewritten.
    pub fn transform(self, f: &mut dyn FnMut(&Expr) -> Option<Expr>) -> Expr {
        if let Some(replacement) = f(&self) {
            return replacement;
        }

        match self {
            Expr::Literal(_) => self,
            Expr::Paren(paren) => Expr::Paren(Paren {
                expr: Box::new(paren.expr.transform(f)),
                span: paren.span,
            }),
            Expr::Call(call) => Expr::Call(Call {
                args: call.args.into_iter().map(|arg| arg.transform(f)).collect(),
                ..call
            }),
            Expr::Unary(unary) => Expr::Unary(Unary {
                operand: Box::new(unary.operand.transform(f)),
                ..unary
            }),
            Expr::Binary(binary) => Expr::Binary(Binary {
                lhs: Box::new(binary.lhs.transform(f)),
                rhs: Box::new(binary.rhs.transform(f)),
                ..binary
            }),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.parse_expr(Precedence::Any)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_latex(f),
            Expr::Paren(paren) => paren.fmt_latex(f),
            Expr::Call(call) => call.fmt_latex(f),
            Expr::Unary(unary) => unary.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
        }
    }
}
