//! Derivatives of the builtin functions in [`crate::funcs`].

use crate::funcs;
use crate::primitive::int;
use crate::symbolic::{expr::{Primary, SymExpr}, simplify::fraction::integer_fraction};
use taylor_error::Error;
use super::{derivative, underivable, MultBuilder};

/// Checks every function call in the expression with [`funcs::check_call`].
pub(super) fn check_calls(expr: &SymExpr) -> Result<(), Error> {
    for sub_expr in expr.post_order_iter() {
        if let SymExpr::Primary(Primary::Call(name, args)) = sub_expr {
            funcs::check_call(name, args.len())?;
        }
    }
    Ok(())
}

fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// `(1 ± u^2)^exp`, used by the inverse trigonometric functions.
fn one_plus_square(sign: i32, u: &SymExpr, exp: SymExpr) -> SymExpr {
    let square = SymExpr::integer(sign) * SymExpr::pow(u.clone(), SymExpr::integer(2));
    SymExpr::pow(SymExpr::integer(1) + square, exp)
}

/// Computes the derivative of a builtin function call and applies the chain rule.
pub(super) fn function_derivative(name: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    funcs::check_call(name, args.len())?;
    let neg_half = || integer_fraction(int(-1), int(2));

    // the derivative of the function, evaluated at its argument
    let outer = match (name, args) {
        ("sin", [u]) => call("cos", u),
        ("cos", [u]) => SymExpr::integer(-1) * call("sin", u),
        ("tan", [u]) => SymExpr::pow(call("cos", u), SymExpr::integer(-2)),
        ("asin", [u]) => one_plus_square(-1, u, neg_half()),
        ("acos", [u]) => SymExpr::integer(-1) * one_plus_square(-1, u, neg_half()),
        ("atan", [u]) => one_plus_square(1, u, SymExpr::integer(-1)),
        ("sinh", [u]) => call("cosh", u),
        ("cosh", [u]) => call("sinh", u),
        ("tanh", [u]) => SymExpr::pow(call("cosh", u), SymExpr::integer(-2)),
        ("exp", [u]) => call("exp", u),
        ("ln", [u]) | ("log", [u]) => SymExpr::pow(u.clone(), SymExpr::integer(-1)),
        ("log", [u, base]) => {
            // log(u, b) = ln(u) / ln(b)
            let quotient = call("ln", u) * SymExpr::pow(call("ln", base), SymExpr::integer(-1));
            return derivative(&quotient, with);
        },
        ("sqrt", [u]) => integer_fraction(int(1), int(2))
            * SymExpr::pow(call("sqrt", u), SymExpr::integer(-1)),
        ("cbrt", [u]) => integer_fraction(int(1), int(3))
            * SymExpr::pow(call("cbrt", u), SymExpr::integer(-2)),
        ("abs", [u]) => u.clone() * SymExpr::pow(call("abs", u), SymExpr::integer(-1)),
        _ => return Err(underivable(&SymExpr::call(name, args.to_vec()))),
    };

    let mut mult = MultBuilder::default();
    mult.mult(outer);
    if let [u] = args {
        mult.mult(derivative(u, with)?);
    }
    Ok(mult.into())
}
