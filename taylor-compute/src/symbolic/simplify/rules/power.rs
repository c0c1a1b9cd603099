//! Rules for powers.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::{first_applicable, numeric::numeric_value, Rule}, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer};

/// Integer powers whose result would have more bits than this are left unevaluated.
const MAX_POWER_BITS: u64 = 1 << 16;

/// Returns the base and exponent of a power.
fn as_power(expr: &SymExpr) -> Option<(&SymExpr, &SymExpr)> {
    match expr {
        SymExpr::Exp(base, exp) => Some((&**base, &**exp)),
        _ => None,
    }
}

fn integer(n: Integer) -> SymExpr {
    SymExpr::Primary(Primary::Integer(n))
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr) -> Option<SymExpr> {
    let (_, exp) = as_power(expr)?;
    exp.is_integer_value(0).then(|| SymExpr::integer(1))
}

/// `0^a = 0`, for positive `a`
pub fn power_zero_left(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = as_power(expr)?;
    if !base.is_integer_value(0) {
        return None;
    }
    let exp = numeric_value(exp)?;
    (exp.is_sign_positive() && !exp.is_zero()).then(|| SymExpr::integer(0))
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = as_power(expr)?;
    exp.is_integer_value(1).then(|| base.clone())
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr) -> Option<SymExpr> {
    let (base, _) = as_power(expr)?;
    base.is_integer_value(1).then(|| SymExpr::integer(1))
}

/// `(a^b)^c = a^(b*c)`, for integer `c`. For other `c` it does not hold: `(x^2)^(1/2)` is `|x|`.
pub fn power_power(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = as_power(expr)?;
    let (inner_base, inner_exp) = as_power(base)?;
    exp.is_integer().then(|| SymExpr::pow(inner_base.clone(), inner_exp.clone() * exp.clone()))
}

/// Evaluates integer powers of integers, leaving negative powers as fractions.
///
/// `2^10 = 1024`
/// `2^-3 = 1/8`
/// `(-4)^-1 = -1/4`
pub fn integer_power(expr: &SymExpr) -> Option<SymExpr> {
    let (base, exp) = as_power(expr)?;
    let (base, exp) = (base.as_integer()?, exp.as_integer()?);

    if *exp >= 2 {
        let exp = exp.to_u32()?;
        let bits = u64::from(base.significant_bits()) * u64::from(exp);
        (bits <= MAX_POWER_BITS).then(|| integer(base.clone().pow(exp)))
    } else if *exp <= -2 && *base != 0 {
        // a^-n = (a^n)^-1
        let positive = SymExpr::pow(integer(base.clone()), integer(Integer::from(-exp)));
        Some(SymExpr::pow(positive, SymExpr::integer(-1)))
    } else if *exp == -1 && *base < 0 {
        // the sign moves out of the denominator
        let magnitude = SymExpr::pow(integer(Integer::from(-base)), SymExpr::integer(-1));
        Some(SymExpr::integer(-1) * magnitude)
    } else {
        None
    }
}

const RULES: &[(Rule, Step)] = &[
    (power_zero, Step::PowerZero),
    (power_zero_left, Step::PowerZeroLeft),
    (power_one, Step::PowerOne),
    (power_one_left, Step::PowerOneLeft),
    (power_power, Step::PowerPower),
    (integer_power, Step::IntegerPower),
];

pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    first_applicable(expr, RULES, step_collector)
}
