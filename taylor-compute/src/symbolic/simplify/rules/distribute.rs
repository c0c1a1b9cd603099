//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{first_applicable, Rule}, simplify, step::Step},
    step_collector::StepCollector,
};

/// Sums are only expanded when raised to an integer power in this range.
const EXPANDABLE_POWERS: std::ops::RangeInclusive<u32> = 2..=16;

/// Multiplies two sums term by term, without simplifying the result.
///
/// `(a+b)(c+d) = ac + ad + bc + bd`
fn multiply_sums(lhs: &[SymExpr], rhs: &[SymExpr]) -> SymExpr {
    let terms = lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| a.clone() * b.clone()))
        .collect();
    SymExpr::Add(terms)
}

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };

    // the first sum takes every other factor
    let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
    let mut others = factors.clone();
    let SymExpr::Add(terms) = others.swap_remove(idx) else {
        return None;
    };

    let new_terms = terms.into_iter()
        .map(|term| SymExpr::Mul(others.clone()) * term)
        .collect();
    Some(SymExpr::Add(new_terms))
}

/// `(a*b)^c = a^c * b^c`, for integers `c`
pub fn distribute_power(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = expr else {
        return None;
    };
    let SymExpr::Mul(factors) = &**base else {
        return None;
    };
    if !exp.is_integer() {
        return None;
    }

    let new_factors = factors.iter()
        .map(|factor| SymExpr::pow(factor.clone(), (**exp).clone()))
        .collect();
    Some(SymExpr::Mul(new_factors))
}

/// Expands a sum raised to a small positive integer power.
///
/// `(a+b)^2 = a^2 + 2ab + b^2`
///
/// Each partial product is simplified before the next factor is multiplied in, so the number of
/// terms stays proportional to the size of the final result.
pub fn expand_power(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = expr else {
        return None;
    };
    let SymExpr::Add(terms) = &**base else {
        return None;
    };
    let exp = exp.as_integer()?.to_u32().filter(|exp| EXPANDABLE_POWERS.contains(exp))?;

    let product = (1..exp).fold((**base).clone(), |product, _| match product {
        SymExpr::Add(partial) => simplify(&multiply_sums(&partial, terms)),
        other => simplify(&multiply_sums(&[other], terms)),
    });
    Some(product)
}

const RULES: &[(Rule, Step)] = &[
    (distributive_property, Step::DistributiveProperty),
    (distribute_power, Step::DistributePower),
    (expand_power, Step::ExpandPower),
];

/// Applies all distribution rules.
///
/// Distributing can make an expression longer, but the terms of a polynomial are only collected
/// once every product of sums is multiplied out.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    first_applicable(expr, RULES, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    #[test]
    fn distribute_over_first_sum() {
        let distributed = distributive_property(&parse_expr("2(x + y)"));
        assert_eq!(distributed, Some(parse_expr("2x + 2y")));
    }

    #[test]
    fn power_of_product() {
        assert_eq!(
            distribute_power(&parse_expr("(2x)^3")),
            Some(parse_expr("2^3 * x^3")),
        );
        assert_eq!(distribute_power(&parse_expr("(2x)^(1/2)")), None);
    }

    #[test]
    fn expand_square() {
        let expanded = expand_power(&parse_expr("(x + 1)^2"));
        assert_eq!(expanded, Some(parse_expr("x^2 + 2x + 1")));
    }

    #[test]
    fn large_power_is_kept() {
        assert_eq!(expand_power(&parse_expr("(x + 1)^17")), None);
        assert_eq!(expand_power(&parse_expr("(x + 1)^(-2)")), None);
    }
}
