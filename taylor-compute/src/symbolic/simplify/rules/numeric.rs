//! Simplification rules that fold numbers.
//!
//! Exact arithmetic on integers and fractions is handled by the other rule families. The rules
//! here cover everything that involves a [`Primary::Float`]: once a float takes part in an
//! operation, the numeric part of the operation is folded into a single float. Calls to known
//! functions with numeric arguments are evaluated here too.

use crate::funcs;
use crate::primitive::{float, is_integral};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::{first_applicable, Rule}, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Float};

/// Returns the numeric value of the expression, if it is made only of numbers.
///
/// Numbers, and sums, products, and powers of numbers have a value. Returns [`None`] for anything
/// containing a symbol or a call, or if the value is not a finite real number.
pub(crate) fn numeric_value(expr: &SymExpr) -> Option<Float> {
    let value = match expr {
        SymExpr::Primary(Primary::Integer(n)) => float(n),
        SymExpr::Primary(Primary::Float(f)) => f.clone(),
        SymExpr::Primary(_) => return None,
        SymExpr::Add(terms) => terms.iter()
            .map(numeric_value)
            .try_fold(float(0), |sum, term| Some(sum + term?))?,
        SymExpr::Mul(factors) => factors.iter()
            .map(numeric_value)
            .try_fold(float(1), |product, factor| Some(product * factor?))?,
        SymExpr::Exp(base, exp) => numeric_value(base)?.pow(numeric_value(exp)?),
    };

    value.is_finite().then_some(value)
}

/// Returns true if a float appears anywhere in the expression.
fn contains_float(expr: &SymExpr) -> bool {
    expr.post_order_iter().any(SymExpr::is_float)
}

/// Folds the numeric terms of a sum containing a float into one float.
///
/// `0.5 + 1/4 + x = 0.75 + x`
pub fn fold_float_terms(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else {
        return None;
    };
    if !terms.iter().any(SymExpr::is_float) {
        return None;
    }

    let mut sum = float(0);
    let mut folded = 0;
    let mut new_terms = Vec::with_capacity(terms.len());
    for term in terms {
        match numeric_value(term) {
            Some(value) => {
                sum += value;
                folded += 1;
            },
            None => new_terms.push(term.clone()),
        }
    }

    if folded < 2 || !sum.is_finite() {
        return None;
    }

    new_terms.push(SymExpr::Primary(Primary::Float(sum)));
    Some(SymExpr::Add(new_terms).downgrade())
}

/// Folds the numeric factors of a product containing a float into one float.
///
/// `0.5 * 4 * x = 2.0 * x`
pub fn fold_float_factors(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };
    if !factors.iter().any(SymExpr::is_float) {
        return None;
    }

    let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
        .map(|factor| (numeric_value(factor), factor))
        .partition(|(value, _)| value.is_some());
    if numbers.len() < 2 {
        return None;
    }

    let product = numbers.into_iter()
        .filter_map(|(value, _)| value)
        .fold(float(1), |product, value| product * value);
    if !product.is_finite() {
        return None;
    }

    let new_factors = std::iter::once(SymExpr::Primary(Primary::Float(product)))
        .chain(rest.into_iter().map(|(_, factor)| factor.clone()))
        .collect();
    Some(SymExpr::Mul(new_factors).downgrade())
}

/// Folds a power of numbers, where the base or exponent is a float, into one float.
///
/// `2.5^2 = 6.25`
pub fn fold_float_power(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = expr else {
        return None;
    };
    if !base.is_float() && !exp.is_float() {
        return None;
    }

    let value = numeric_value(base)?.pow(numeric_value(exp)?);
    value.is_finite().then(|| SymExpr::Primary(Primary::Float(value)))
}

/// Converts a float with an integer value into an integer.
///
/// `2.0 = 2`
pub fn integral_float(expr: &SymExpr) -> Option<SymExpr> {
    let value = expr.as_float().filter(|value| is_integral(value))?;
    value.to_integer().map(|n| SymExpr::Primary(Primary::Integer(n)))
}

/// Evaluates calls to known functions whose arguments are all numbers.
///
/// The call is folded if the result is an integer, such as `cos(0) = 1`, or if any argument is a
/// float, such as `sin(0.5) = 0.479...`. Otherwise an exact call like `sin(1)` is kept, and so is
/// any call with a non-finite result, like `ln(0)`.
pub fn evaluate_call(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Primary(Primary::Call(name, args)) = expr else {
        return None;
    };

    let builtin = funcs::get(name)?;
    if !builtin.accepts(args.len()) {
        return None;
    }

    let values = args.iter().map(numeric_value).collect::<Option<Vec<_>>>()?;
    let value = (builtin.eval)(&values);
    if !value.is_finite() {
        return None;
    }

    if is_integral(&value) {
        value.to_integer().map(|n| SymExpr::Primary(Primary::Integer(n)))
    } else if args.iter().any(contains_float) {
        Some(SymExpr::Primary(Primary::Float(value)))
    } else {
        None
    }
}

const RULES: &[(Rule, Step)] = &[
    (fold_float_terms, Step::FoldFloats),
    (fold_float_factors, Step::FoldFloats),
    (fold_float_power, Step::FoldFloats),
    (integral_float, Step::IntegralFloat),
    (evaluate_call, Step::EvaluateCall),
];

/// Applies all numeric folding rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    first_applicable(expr, RULES, step_collector)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    #[test]
    fn values() {
        assert_float_absolute_eq!(numeric_value(&parse_expr("3/4")).unwrap().to_f64(), 0.75);
        assert_float_absolute_eq!(numeric_value(&parse_expr("2^(1/2)")).unwrap().to_f64(), 2f64.sqrt());
        assert_eq!(numeric_value(&parse_expr("2x")), None);
        assert_eq!(numeric_value(&parse_expr("1/0")), None);
        assert_eq!(numeric_value(&parse_expr("(-1)^(1/2)")), None);
    }

    #[test]
    fn exact_sums_are_not_folded() {
        assert_eq!(fold_float_terms(&parse_expr("1 + 2 + x")), None);
    }

    #[test]
    fn single_float_is_kept() {
        assert_eq!(fold_float_terms(&parse_expr("0.5 + x")), None);
        assert_eq!(fold_float_factors(&parse_expr("0.5x")), None);
    }

    #[test]
    fn call_with_float_argument() {
        let folded = evaluate_call(&parse_expr("sin(0.5)")).unwrap();
        assert_float_absolute_eq!(folded.as_float().unwrap().to_f64(), 0.5f64.sin());
    }

    #[test]
    fn unknown_call_is_kept() {
        assert_eq!(evaluate_call(&parse_expr("f(0)")), None);
        assert_eq!(evaluate_call(&parse_expr("sin(0, 1)")), None);
    }
}
