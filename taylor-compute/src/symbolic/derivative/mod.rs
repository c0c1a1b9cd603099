//! Symbolic differentiation of [`SymExpr`]s.
//!
//! The derivative is built structurally from the sum, product, power and chain rules. The result
//! is only lightly cleaned up while it is built (trivial zeros and ones are dropped), and is
//! meant to be passed to [`simplify`](crate::symbolic::simplify()) afterwards.

mod function;

use crate::numerical::error::Underivable;
use crate::symbolic::{expr::{Primary, SymExpr}, simplify::rules::numeric::numeric_value};
use taylor_error::Error;
use tracing::trace;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up the
/// derivative as it is built, and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => f.is_zero(),
        SymExpr::Primary(Primary::Integer(i)) => i.is_zero(),
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => {
            is_trivially_zero(base)
                && numeric_value(exp).is_some_and(|exp| exp.is_sign_positive() && !exp.is_zero())
        },
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up the
/// derivative as it is built, and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => *f == 1,
        SymExpr::Primary(Primary::Integer(i)) => *i == 1,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => exp.is_integer_value(0) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::integer(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a sum of expressions while applying basic simplification rules. Only
/// non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..factors.len() {
        let mut inner_mult = MultBuilder::default();
        for (factor_index, factor) in factors.iter().enumerate() {
            if factor_index == derivative_index {
                inner_mult.mult(derivative(factor, with)?);
            } else {
                inner_mult.mult(factor.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Returns `n - 1`, folded if `n` is a number.
fn minus_one(n: &SymExpr) -> SymExpr {
    match n {
        SymExpr::Primary(Primary::Integer(i)) => SymExpr::Primary(Primary::Integer(i.clone() - 1)),
        SymExpr::Primary(Primary::Float(f)) => SymExpr::Primary(Primary::Float(f.clone() - 1)),
        n => n.clone() + SymExpr::integer(-1),
    }
}

/// Returns the natural logarithm of the expression, which is simply `1` for Euler's number.
fn ln(e: &SymExpr) -> SymExpr {
    if e.as_symbol() == Some("e") {
        SymExpr::integer(1)
    } else {
        SymExpr::call("ln", vec![e.clone()])
    }
}

/// Differentiates `base^exp`.
fn power_rule(expr: &SymExpr, base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    let mut mult = MultBuilder::default();
    match (base.contains_symbol(with), exp.contains_symbol(with)) {
        // (f^n)' = n * f^(n-1) * f'
        (true, false) => {
            mult.mult(exp.clone());
            mult.mult(SymExpr::pow(base.clone(), minus_one(exp)));
            mult.mult(derivative(base, with)?);
        },
        // (a^g)' = a^g * ln(a) * g'
        (false, true) => {
            mult.mult(expr.clone());
            mult.mult(ln(base));
            mult.mult(derivative(exp, with)?);
        },
        // (f^g)' = f^g * (g' * ln(f) + g * f' / f)
        (true, true) => {
            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exp, with)?);
            log_term.mult(ln(base));

            let mut base_term = MultBuilder::default();
            base_term.mult(exp.clone());
            base_term.mult(derivative(base, with)?);
            base_term.mult(SymExpr::pow(base.clone(), SymExpr::integer(-1)));

            let mut sum = SumBuilder::default();
            sum.add(log_term.into());
            sum.add(base_term.into());

            mult.mult(expr.clone());
            mult.mult(sum.into());
        },
        (false, false) => return Ok(SymExpr::integer(0)),
    }
    Ok(mult.into())
}

/// Computes the derivative of the given expression with respect to the variable `with`.
///
/// Every symbol other than `with` is treated as a constant. Returns [`Err`] if the expression
/// calls an unknown function, or calls a function with the wrong number of arguments.
///
/// ```
/// use taylor_compute::symbolic::{derivative, simplify, SymExpr};
/// use taylor_parser::parser::{ast::Expr, Parser};
///
/// let expr = SymExpr::from(Parser::new("x^3 + y x").try_parse_full::<Expr>().unwrap());
/// let result = simplify(&derivative(&expr, "x").unwrap());
/// assert_eq!(result.to_string(), "3x^2 + y");
/// ```
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    if is_trivially_zero(f) || !f.contains_symbol(with) {
        // still reject unknown functions that are constant in `with`
        function::check_calls(f)?;
        return Ok(SymExpr::integer(0));
    }

    let result = match f {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => {
            Ok(SymExpr::integer(0))
        },
        SymExpr::Primary(Primary::Symbol(sym)) => {
            Ok(SymExpr::integer(if sym == with { 1 } else { 0 }))
        },
        SymExpr::Primary(Primary::Call(name, args)) => function::function_derivative(name, args, with),
        SymExpr::Add(terms) => sum_rule(terms, with),
        SymExpr::Mul(factors) => product_rule(factors, with),
        SymExpr::Exp(base, exp) => power_rule(f, base, exp, with),
    }?;

    trace!(%f, %result, with, "derivative");
    if is_trivially_zero(&result) {
        Ok(SymExpr::integer(0))
    } else {
        Ok(result)
    }
}

/// Creates the error for an expression that cannot be differentiated.
fn underivable(expr: &SymExpr) -> Error {
    Error::new(Vec::new(), Underivable { expr: expr.to_string() })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::numerical::{error::{UndefinedFunction, WrongArgumentCount}, eval, Ctxt};
    use crate::symbolic::{expr::tests::parse_expr, simplify};

    /// Evaluates the expression with `x` bound to the given value.
    fn eval_x(expr: &SymExpr, x: f64) -> f64 {
        let ctxt = [("x", x)].into_iter().collect::<Ctxt>();
        let value = eval(expr, &ctxt).unwrap();
        numeric_value(&value).unwrap().to_f64()
    }

    /// Approximates the derivative of the expression at `x` with a central difference.
    fn finite_difference(expr: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(expr, x + DX) - eval_x(expr, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        let expr = parse_expr(function);
        let symbolic = simplify(&derivative(&expr, "x").unwrap());

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert_float_absolute_eq!(symbolically_computed, numerically_computed, 1e-4);
        }
    }

    #[test]
    fn polynomials() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
        test_for_function("(x^2 + 1)^3", [-1.5, 0.0, 0.5]);
        test_for_function("3x^-2 + x/4", [0.5, 2.0]);
    }

    #[test]
    fn products() {
        test_for_function("x sin(x) cos(x)", [0.0, 0.7, 2.0]);
        test_for_function("(x + 1)(x - 2)^2", [-1.0, 0.5, 3.0]);
    }

    #[test]
    fn trigonometry() {
        test_for_function("tan(x)", [0.0, 0.4, -1.0]);
        test_for_function("asin(x) + acos(2x) + atan(x^2)", [0.1, -0.3]);
        test_for_function("sinh(x) + cosh(x) * tanh(x)", [0.0, 1.2]);
    }

    #[test]
    fn exponentials_and_logarithms() {
        test_for_function("exp(2x) + e^x", [0.0, 1.0]);
        test_for_function("ln(x^2 + 1) + log(x) + log(x, 2)", [0.5, 3.0]);
        test_for_function("2^x + x^x", [0.5, 2.0]);
    }

    #[test]
    fn roots_and_abs() {
        test_for_function("sqrt(x) + cbrt(x) + x^(1/2)", [0.5, 4.0]);
        test_for_function("abs(x) * x", [-2.0, 3.0]);
    }

    #[test]
    fn constant_expressions() {
        assert_eq!(derivative(&parse_expr("y^2 + 3 + sin(y)"), "x").unwrap(), SymExpr::integer(0));
        assert_eq!(derivative(&parse_expr("5"), "x").unwrap(), SymExpr::integer(0));
    }

    #[test]
    fn partial_derivatives() {
        let xy = parse_expr("x y");
        assert_eq!(derivative(&xy, "y").unwrap(), SymExpr::symbol("x"));
        assert_eq!(simplify(&derivative(&parse_expr("x^2 y + y^2"), "y").unwrap()).to_string(), "x^2 + 2y");
    }

    #[test]
    fn first_derivatives() {
        let d = |input: &str| simplify(&derivative(&parse_expr(input), "x").unwrap()).to_string();
        assert_eq!(d("sin(x)"), "cos(x)");
        assert_eq!(d("cos(x)"), "-sin(x)");
        assert_eq!(d("e^x"), "e^x");
        assert_eq!(d("x^3/6"), "x^2/2");
    }

    #[test]
    fn unknown_function() {
        let err = derivative(&parse_expr("f(x)"), "x").unwrap_err();
        assert!(err.downcast_kind::<UndefinedFunction>().is_some());

        let err = derivative(&parse_expr("f(1) + x"), "x").unwrap_err();
        assert!(err.downcast_kind::<UndefinedFunction>().is_some());

        let err = derivative(&parse_expr("exp(x, 2)"), "x").unwrap_err();
        assert!(err.downcast_kind::<WrongArgumentCount>().is_some());
    }
}
