//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](taylor_parser::parser::ast::expr::Expr) type from `taylor_parser` is a recursive
//! `enum` that represents the AST of a mathematical expression. It's convenient for parsing, but
//! not so much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], a type that stores the terms and factors that make up an
//! expression. It simplifies the AST by recursively flattening it into a list of terms or factors,
//! depending on the operation, and normalizing subtraction and division into addition and
//! multiplication.
//!
//! # Strict equality
//!
//! Determining whether two expressions are mathematically equal is needed constantly while
//! simplifying, for example to decide whether two terms can be combined. In general this is
//! extremely difficult, because there are an infinite number of ways to write the same
//! expression: `x^2 + 2x + 1` and `(x + 1)^2` are equal, but only after expanding one of them.
//!
//! Instead, we use a subset of mathematical equality called **strict equality**. Two expressions
//! are strictly equal if:
//!
//! - They are the same kind of expression (both [`SymExpr::Primary`], both [`SymExpr::Add`],
//! etc.).
//! - If both are [`SymExpr::Primary`], both have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both have strictly equal terms / factors,
//! in any order.
//! - If both are [`SymExpr::Exp`], both have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, and it does not depend on simplification, so
//! it can be used **in conjunction** with simplification to find terms and factors that can be
//! combined.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement strict equality.

mod fmt;
mod iter;

use crate::primitive::{float_from_str, int, int_from_str};
use iter::ExprIter;
use rug::{Float, Integer};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};
use super::simplify::{fraction::make_fraction, rules::numeric::numeric_value};
use taylor_parser::parser::{
    ast::{binary::Binary, expr::Expr as AstExpr, literal::Literal},
    op::{BinOpKind, UnaryOpKind},
};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `log(x, 2)`.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce NaN floats.
impl Eq for Primary {}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the AST produced by [`taylor_parser`]. The main
/// difference is that this type **flattens** out the tree structure. For example, the expression
/// `x + (y + z)` is represented as a single [`SymExpr::Add`] node with _three_ children, `x`, `y`,
/// and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// Formats the expression the same way the equivalent AST is formatted, so the output can be
/// parsed back in.
impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", AstExpr::from(self.clone()))
    }
}

impl SymExpr {
    /// Creates an expression containing the given integer.
    pub fn integer(n: impl Into<Integer>) -> Self {
        Self::Primary(Primary::Integer(n.into()))
    }

    /// Creates an expression containing the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a call to the function with the given name.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the power `base^exp`.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is the integer `n`.
    pub fn is_integer_value(&self, n: i32) -> bool {
        self.as_integer().is_some_and(|int| *int == n)
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference to
    /// the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        match self {
            Self::Exp(base, exp) if exp.is_integer_value(-1) => base.as_integer(),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns the contained
    /// integer (the denominator of the fraction).
    pub fn into_integer_recip(self) -> Option<Integer> {
        match self {
            Self::Exp(base, exp) if exp.is_integer_value(-1) => base.into_integer(),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(float)) => Some(float),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Primary::Integer`] or a [`Primary::Float`].
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns the value of the expression as an `f64`, if it is made only of numbers, such as
    /// `4/3` or `2^0.5`.
    pub fn to_f64(&self) -> Option<f64> {
        numeric_value(self).map(|value| value.to_f64())
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression,
    /// including inside function arguments.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().symbols().any(|sym| sym == name)
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
                    && rhs.iter().all(|rhs| lhs.contains(rhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Collects a chain of the same binary operator, such as `a + b + (c + d)`, into `acc` without
/// recursing on the chain itself. Operands of other kinds are converted and combined with `push`.
fn flatten(
    bin: Binary,
    kind: BinOpKind,
    mut acc: SymExpr,
    push: fn(&mut SymExpr, SymExpr),
) -> SymExpr {
    let mut stack = vec![AstExpr::Binary(bin)];
    while let Some(expr) = stack.pop() {
        match expr {
            AstExpr::Binary(bin) if bin.op.kind == kind => {
                stack.push(*bin.rhs);
                stack.push(*bin.lhs);
            },
            expr => push(&mut acc, SymExpr::from(expr)),
        }
    }
    acc
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::Float(float_from_str(&float.value))),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => match bin.op.kind {
                BinOpKind::Exp => Self::pow(Self::from(*bin.lhs), Self::from(*bin.rhs)),
                BinOpKind::Mul => flatten(bin, BinOpKind::Mul, Self::Mul(Vec::new()), |acc, expr| *acc *= expr),
                // treat this as lhs * rhs^-1
                BinOpKind::Div => make_fraction(Self::from(*bin.lhs), Self::from(*bin.rhs)),
                BinOpKind::Add => flatten(bin, BinOpKind::Add, Self::Add(Vec::new()), |acc, expr| *acc += expr),
                // treat this as lhs + -1 * rhs
                BinOpKind::Sub => Self::from(*bin.lhs) + Self::from(*bin.rhs).neg(),
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

/// Adds two [`SymExpr`]s together, reusing the allocated memory of `self` if possible.
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs += rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs += rhs;
            },
            (Self::Add(terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
            },
            (Self::Add(terms), other) => {
                terms.push(other);
            },
            (other, Self::Add(mut terms)) => {
                let owned = std::mem::replace(other, Self::Add(Vec::new()));
                terms.insert(0, owned);
                *other = Self::Add(terms);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Add(Vec::new()));
                *lhs = Self::Add(vec![owned, rhs]);
            },
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self {
        self *= rhs;
        self
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Mul(factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
            },
            (Self::Mul(factors), other) => {
                factors.push(other);
            },
            (other, Self::Mul(mut factors)) => {
                let owned = std::mem::replace(other, Self::Mul(Vec::new()));
                factors.insert(0, owned);
                *other = Self::Mul(factors);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Mul(Vec::new()));
                *lhs = Self::Mul(vec![owned, rhs]);
            },
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

/// NOTE: strict equality allows different orderings of terms and factors, but `pretty_assertions`
/// does not, so the diff of a failing test may show differences that do not matter.
#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use taylor_parser::parser::Parser;

    /// Parse the given expression and return the [`SymExpr`] representation.
    pub(crate) fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_repeats() {
        assert_ne!(parse_expr("x*x*y"), parse_expr("x*y*y"));
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::integer(6),
            SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::integer(5)]),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::integer(2)),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("a - b/3");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("a"),
            SymExpr::Mul(vec![
                SymExpr::integer(-1),
                SymExpr::symbol("b"),
                SymExpr::pow(SymExpr::integer(3), SymExpr::integer(-1)),
            ]),
        ]));
    }

    #[test]
    fn negated_literal_folds() {
        assert_eq!(parse_expr("-4"), SymExpr::integer(-4));
        assert_eq!(parse_expr("+x"), SymExpr::symbol("x"));
    }

    #[test]
    fn call_arguments() {
        let expr = parse_expr("log(x - 1, 2)");
        assert_eq!(expr, SymExpr::call("log", vec![
            SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::integer(-1)]),
            SymExpr::integer(2),
        ]));
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("log"));
    }

    #[test]
    fn decimal_literal() {
        let expr = parse_expr("0.25");
        assert_eq!(expr.as_float().map(|f| f.to_f64()), Some(0.25));
    }
}
