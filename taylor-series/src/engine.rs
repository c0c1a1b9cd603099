//! The symbolic-math capabilities that the expansion pipeline is built on.
//!
//! The pipeline in [`crate::expand`] never looks inside an expression. Everything it does with
//! one goes through the [`Engine`] trait, so any computer-algebra backend that can parse,
//! differentiate, evaluate and simplify can drive it. [`Cas`] is the backend built on
//! [`taylor_parser`] and [`taylor_compute`].

use rug::Integer;
use std::{collections::HashMap, fmt::Display, ops::Range};
use taylor_compute::{
    funcs,
    numerical::{eval, Ctxt},
    symbolic::{derivative, simplify, SymExpr},
};
use taylor_error::Error;
use taylor_parser::parser::{
    ast::{Binary, Expr, Literal, Paren},
    fmt::Latex,
    op::{BinOp, BinOpKind},
    Parser,
};
use tracing::trace;

/// A symbolic-math engine.
///
/// Expressions are immutable values: every operation returns a new expression and leaves its
/// inputs untouched, and cloning an expression produces an independent deep copy.
pub trait Engine {
    /// The expression type of the engine.
    type Expr: Clone + Display;

    /// Parses the given text into an expression.
    fn parse(&self, text: &str) -> Result<Self::Expr, Error>;

    /// Splits the expression into its factors if its root is a multiplication. Any other
    /// expression is returned as the only factor.
    ///
    /// The split is shallow: factors that are products themselves are not split any further.
    fn factors(&self, expr: &Self::Expr) -> Vec<Self::Expr>;

    /// Differentiates the expression with respect to the given variable, optionally simplifying
    /// the result.
    fn differentiate(&self, expr: &Self::Expr, var: &str, simplify: bool) -> Result<Self::Expr, Error>;

    /// Evaluates the expression with the given variables bound. Symbols without a binding are
    /// kept in the result.
    fn evaluate(&self, expr: &Self::Expr, bindings: &HashMap<String, f64>) -> Result<Self::Expr, Error>;

    /// Replaces every occurrence of the symbol `var` with `replacement`.
    fn substitute(&self, expr: &Self::Expr, var: &str, replacement: &Self::Expr) -> Self::Expr;

    /// Returns the unevaluated product of the two expressions.
    fn multiply(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> Self::Expr;

    /// Parses and simplifies the given text.
    fn simplify(&self, text: &str) -> Result<Self::Expr, Error>;

    /// Returns `n!`.
    fn factorial(&self, n: u32) -> Integer;

    /// Returns the name and span of every symbol used as a value in the expression, in the order
    /// they appear. Function names are not included.
    fn free_symbols(&self, expr: &Self::Expr) -> Vec<(String, Range<usize>)>;

    /// Renders the expression as LaTeX.
    fn to_latex(&self, expr: &Self::Expr) -> String;
}

/// The [`Engine`] built on [`taylor_parser`] and [`taylor_compute`].
///
/// Expressions are kept as ASTs between operations. Differentiation, evaluation and
/// simplification go through [`SymExpr`] and are rendered back into an AST, so their results have
/// no meaningful spans.
///
/// ```
/// use taylor_series::engine::{Cas, Engine};
///
/// let cas = Cas;
/// let expr = cas.parse("x^3 + sin(x)").unwrap();
/// let derivative = cas.differentiate(&expr, "x", true).unwrap();
/// assert_eq!(derivative.to_string(), "3x^2 + cos(x)");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Cas;

impl Cas {
    /// Checks every function call in the expression, pointing errors at the offending call.
    fn check_calls(expr: &Expr) -> Result<(), Error> {
        for node in expr.post_order_iter() {
            if let Expr::Call(call) = node {
                funcs::check_call(&call.name.name, call.args.len())
                    .map_err(|err| err.with_spans(call.outer_span().to_vec()))?;
            }
        }
        Ok(())
    }

    /// Runs `f` on the symbolic form of the expression and renders the result back.
    fn with_symbolic(
        expr: &Expr,
        f: impl FnOnce(SymExpr) -> Result<SymExpr, Error>,
    ) -> Result<Expr, Error> {
        f(SymExpr::from(expr.clone())).map(Expr::from)
    }
}

/// Wraps the expression in parentheses, unless it is a literal or a call.
fn paren(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(_) | Expr::Call(_) | Expr::Paren(_) => expr,
        expr => {
            let span = expr.span();
            Expr::Paren(Paren { expr: Box::new(expr), span })
        },
    }
}

impl Engine for Cas {
    type Expr = Expr;

    fn parse(&self, text: &str) -> Result<Expr, Error> {
        let expr = Parser::new(text).try_parse_full::<Expr>()?;
        Self::check_calls(&expr)?;
        Ok(expr)
    }

    fn factors(&self, expr: &Expr) -> Vec<Expr> {
        match expr {
            Expr::Binary(binary) if binary.op.kind == BinOpKind::Mul => {
                vec![(*binary.lhs).clone(), (*binary.rhs).clone()]
            },
            expr => vec![expr.clone()],
        }
    }

    fn differentiate(&self, expr: &Expr, var: &str, simplify_result: bool) -> Result<Expr, Error> {
        Self::with_symbolic(expr, |expr| {
            let derivative = derivative(&expr, var)?;
            trace!(%expr, var, %derivative, "differentiated");
            if simplify_result {
                Ok(simplify(&derivative))
            } else {
                Ok(derivative)
            }
        })
    }

    fn evaluate(&self, expr: &Expr, bindings: &HashMap<String, f64>) -> Result<Expr, Error> {
        let ctxt = bindings.iter()
            .map(|(name, value)| (name, *value))
            .collect::<Ctxt>();
        Self::with_symbolic(expr, |expr| eval(&expr, &ctxt).map(|value| simplify(&value)))
    }

    fn substitute(&self, expr: &Expr, var: &str, replacement: &Expr) -> Expr {
        expr.clone().transform(&mut |node| match node {
            Expr::Literal(Literal::Symbol(sym)) if sym.name == var => {
                Some(Expr::Paren(Paren {
                    expr: Box::new(replacement.clone()),
                    span: sym.span.clone(),
                }))
            },
            _ => None,
        })
    }

    fn multiply(&self, lhs: &Expr, rhs: &Expr) -> Expr {
        let (lhs, rhs) = (paren(lhs.clone()), paren(rhs.clone()));
        let span = lhs.span().start.min(rhs.span().start)..lhs.span().end.max(rhs.span().end);
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 0..0 },
            rhs: Box::new(rhs),
            span,
        })
    }

    fn simplify(&self, text: &str) -> Result<Expr, Error> {
        let expr = self.parse(text)?;
        Self::with_symbolic(&expr, |expr| Ok(simplify(&expr)))
    }

    fn factorial(&self, n: u32) -> Integer {
        funcs::combinatoric::factorial(n)
    }

    fn free_symbols(&self, expr: &Expr) -> Vec<(String, Range<usize>)> {
        expr.post_order_iter()
            .symbols()
            .map(|sym| (sym.name.clone(), sym.span.clone()))
            .collect()
    }

    fn to_latex(&self, expr: &Expr) -> String {
        expr.as_display().to_string()
    }
}
