//! Rules for sums.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{
        fraction::{extract_explicit_frac, extract_fractional, integer_fraction},
        rules::{first_applicable, numeric::numeric_value, Rule},
        step::Step,
    },
    step_collector::StepCollector,
};

/// Adds two numeric coefficients. Exact fractions give an exact sum, and a float on either side
/// gives a float. Returns [`None`] if there is no finite sum, such as with a zero denominator.
fn add_coefficients(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    if lhs.is_float() || rhs.is_float() {
        let sum = numeric_value(lhs)? + numeric_value(rhs)?;
        return sum.is_finite().then_some(SymExpr::Primary(Primary::Float(sum)));
    }

    let (a, b) = extract_explicit_frac(&mut lhs.clone())?;
    let (c, d) = extract_explicit_frac(&mut rhs.clone())?;
    if b == 0 || d == 0 {
        return None;
    }

    // a/b + c/d = (ad + bc)/bd
    let numerator = a * &d + c * &b;
    Some(integer_fraction(numerator, b * d))
}

/// Splits a term into its numeric coefficient and the rest.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `5` -> `(5, 1)`
/// - `a` -> `(1, a)`
fn split_coefficient(term: &SymExpr) -> (SymExpr, SymExpr) {
    match term {
        SymExpr::Mul(factors) => {
            let mut rest = factors.clone();
            let coeff = extract_fractional(&mut rest).unwrap_or_else(|| SymExpr::integer(1));
            (coeff, SymExpr::Mul(rest).downgrade())
        },
        _ if term.is_number() || term.is_integer_recip() => (term.clone(), SymExpr::integer(1)),
        _ => (SymExpr::integer(1), term.clone()),
    }
}

/// `a + 0 = a`
pub fn add_zero(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else {
        return None;
    };
    if !terms.iter().any(|term| term.is_integer_value(0)) {
        return None;
    }

    let rest = terms.iter().filter(|term| !term.is_integer_value(0)).cloned().collect();
    Some(SymExpr::Add(rest).downgrade())
}

/// Adds up the coefficients of terms that only differ in their coefficient.
///
/// `a + a = 2a`
/// `a/2 + a/3 = 5a/6`
pub fn combine_like_terms(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else {
        return None;
    };

    let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(terms.len());
    for term in terms {
        let (coeff, rest) = split_coefficient(term);
        let merged = groups.iter_mut().any(|(group_coeff, group_rest)| {
            if *group_rest != rest {
                return false;
            }
            match add_coefficients(group_coeff, &coeff) {
                Some(sum) => {
                    *group_coeff = sum;
                    true
                },
                None => false,
            }
        });
        if !merged {
            groups.push((coeff, rest));
        }
    }

    if groups.len() == terms.len() {
        return None;
    }

    let terms = groups.into_iter()
        .map(|(coeff, rest)| {
            if coeff.is_integer_value(1) {
                rest
            } else if rest.is_integer_value(1) {
                coeff
            } else {
                coeff * rest
            }
        })
        .collect();
    Some(SymExpr::Add(terms).downgrade())
}

const RULES: &[(Rule, Step)] = &[
    (add_zero, Step::AddZero),
    (combine_like_terms, Step::CombineLikeTerms),
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
    fn coefficients() {
        assert_eq!(split_coefficient(&parse_expr("3x")), (SymExpr::integer(3), SymExpr::symbol("x")));
        assert_eq!(split_coefficient(&parse_expr("x")), (SymExpr::integer(1), SymExpr::symbol("x")));
        assert_eq!(split_coefficient(&parse_expr("7")), (SymExpr::integer(7), SymExpr::integer(1)));
    }

    #[test]
    fn exact_coefficient_sum() {
        assert_eq!(add_coefficients(&parse_expr("1/2"), &parse_expr("1/3")), Some(parse_expr("5/6")));
        assert_eq!(
            add_coefficients(&SymExpr::integer(2), &SymExpr::integer(-2)),
            Some(SymExpr::integer(0)),
        );
    }

    #[test]
    fn zero_denominator_is_not_combined() {
        assert_eq!(combine_like_terms(&parse_expr("x/0 + x/0")), None);
    }

    #[test]
    fn no_like_terms() {
        let expr = parse_expr("x + y + 2");
        assert_eq!(combine_like_terms(&expr), None);
        assert_eq!(add_zero(&expr), None);
    }

    #[test]
    fn reports_the_rule_that_fired() {
        let mut steps = Vec::new();
        assert_eq!(all(&parse_expr("x + 0"), &mut steps), Some(SymExpr::symbol("x")));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
