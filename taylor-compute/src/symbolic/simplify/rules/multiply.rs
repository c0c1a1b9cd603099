//! Rules for products.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{
        fraction::{extract_integer_fraction, integer_fraction},
        rules::{first_applicable, Rule},
        step::Step,
    },
    step_collector::StepCollector,
};

/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Mul(factors) if factors.iter().any(|factor| factor.is_integer_value(0)) => {
            Some(SymExpr::integer(0))
        },
        _ => None,
    }
}

/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };
    if !factors.iter().any(|factor| factor.is_integer_value(1)) {
        return None;
    }

    let rest = factors.iter().filter(|factor| !factor.is_integer_value(1)).cloned().collect();
    Some(SymExpr::Mul(rest).downgrade())
}

/// Brings the integer fraction among the factors to lowest terms, with a positive denominator.
///
/// `3/12 = 1/4`
/// `12/3 = 4`
/// `3/(-6) = -1/2`
pub fn reduce_numerical_fraction(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };

    let mut rest = factors.clone();
    let (numerator, denominator) = extract_integer_fraction(&mut rest)?;
    if denominator == 0 {
        return None;
    }

    let mut gcd = numerator.clone().gcd(&denominator);
    if denominator < 0 {
        gcd = -gcd;
    }
    if gcd == 1 {
        return None;
    }

    Some((SymExpr::Mul(rest) * integer_fraction(numerator / &gcd, denominator / &gcd)).downgrade())
}

/// Splits a factor into its base and exponent. The exponent of anything but a power is 1.
fn split_power(factor: &SymExpr) -> (SymExpr, SymExpr) {
    match factor {
        SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        _ => (factor.clone(), SymExpr::integer(1)),
    }
}

/// Merges factors with the same base, and numbers with the same exponent.
///
/// `a^b*a^c = a^(b+c)`
/// `2^c*3^c = 6^c`
pub fn combine_like_factors(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };

    let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(factors.len());
    for factor in factors {
        let (base, exp) = split_power(factor);
        let group = groups.iter_mut().find(|(group_base, group_exp)| {
            let numbers_of_one_kind = group_base.is_integer() && base.is_integer()
                || group_base.is_float() && base.is_float();
            *group_exp == exp && numbers_of_one_kind || *group_base == base
        });

        match group {
            Some((group_base, group_exp)) if *group_exp == exp && group_base.is_number() => {
                *group_base *= base;
            },
            Some((_, group_exp)) => *group_exp += exp,
            None => groups.push((base, exp)),
        }
    }

    if groups.len() == factors.len() {
        return None;
    }

    let factors = groups.into_iter()
        .map(|(base, exp)| if exp.is_integer_value(1) { base } else { SymExpr::pow(base, exp) })
        .collect();
    Some(SymExpr::Mul(factors).downgrade())
}

const RULES: &[(Rule, Step)] = &[
    (multiply_zero, Step::MultiplyZero),
    (multiply_one, Step::MultiplyOne),
    (reduce_numerical_fraction, Step::ReduceFraction),
    (combine_like_factors, Step::CombineLikeFactors),
];

pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    first_applicable(expr, RULES, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    #[test]
    fn zero_and_one() {
        assert_eq!(multiply_zero(&parse_expr("x * 0 * y")), Some(SymExpr::integer(0)));
        assert_eq!(multiply_one(&parse_expr("1 * x")), Some(SymExpr::symbol("x")));
        assert_eq!(multiply_one(&parse_expr("x * y")), None);
    }

    #[test]
    fn reduce() {
        assert_eq!(
            reduce_numerical_fraction(&parse_expr("12/3")),
            Some(SymExpr::Mul(vec![]) * SymExpr::integer(4)),
        );
        assert_eq!(reduce_numerical_fraction(&parse_expr("2/3")), None);
    }

    #[test]
    fn negative_denominator() {
        let factors = vec![
            SymExpr::integer(1),
            SymExpr::pow(SymExpr::integer(-2), SymExpr::integer(-1)),
        ];
        let reduced = reduce_numerical_fraction(&SymExpr::Mul(factors));
        assert_eq!(reduced, Some(parse_expr("-1/2")));
    }

    #[test]
    fn like_factors() {
        let combined = combine_like_factors(&parse_expr("x * y * x"));
        assert_eq!(combined, Some(SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::integer(2)),
            SymExpr::symbol("y"),
        ])));
    }
}
