//! Simplification of [`SymExpr`]s.
//!
//! Simplification applies a set of rules to an expression until none of them apply. Each rule is
//! a function that accepts an expression and returns `Some(expr)` with the rewritten expression if
//! the rule is applicable, or `None` otherwise (see [`rules`]).
//!
//! Children are always simplified before their parent, so every rule can assume that the terms,
//! factors, or call arguments it inspects are already simplified.

pub mod fraction;
pub mod rules;
pub mod step;

use step::Step;
use super::{expr::{Primary, SymExpr}, step_collector::StepCollector};
use tracing::warn;

/// The signature of a function that applies simplification rules to an expression.
pub type Rules = fn(&SymExpr, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// The maximum number of rewrites applied to a single node before giving up.
const MAX_REWRITES: usize = 1 << 12;

/// Simplifies the terms, factors, base and exponent, or call arguments of the expression.
fn simplify_children(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| inner_simplify_with(arg, rules, step_collector))
                .collect();
            SymExpr::Primary(Primary::Call(name.clone(), args))
        },
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => {
            // simplified terms may themselves be sums, which `+=` flattens
            let mut sum = SymExpr::Add(Vec::with_capacity(terms.len()));
            for term in terms {
                sum += inner_simplify_with(term, rules, step_collector);
            }
            sum.downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut product = SymExpr::Mul(Vec::with_capacity(factors.len()));
            for factor in factors {
                product *= inner_simplify_with(factor, rules, step_collector);
            }
            product.downgrade()
        },
        SymExpr::Exp(base, exp) => SymExpr::Exp(
            Box::new(inner_simplify_with(base, rules, step_collector)),
            Box::new(inner_simplify_with(exp, rules, step_collector)),
        ),
    }
}

/// Simplifies the expression bottom-up: the children are simplified first, then the rules are
/// applied to the node itself until they no longer apply.
fn inner_simplify_with(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut expr = simplify_children(expr, rules, step_collector);
    for _ in 0..MAX_REWRITES {
        match rules(&expr, step_collector) {
            Some(rewritten) => expr = simplify_children(&rewritten, rules, step_collector),
            None => return expr,
        }
    }

    warn!(%expr, "simplification did not reach a fixed point");
    expr
}

/// Simplifies the given expression using all available rules.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    inner_simplify_with(expr, rules::all, &mut ())
}

/// Simplifies the given expression using only the given rules.
pub fn simplify_with(expr: &SymExpr, rules: Rules) -> SymExpr {
    inner_simplify_with(expr, rules, &mut ())
}

/// Simplifies the given expression using all available rules, returning the steps taken.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = inner_simplify_with(expr, rules::all, &mut steps);
    (simplified, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::tests::parse_expr;

    /// Simplifies the input and returns its display form.
    fn simplified(input: &str) -> String {
        simplify(&parse_expr(input)).to_string()
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + x + x"), "3x");
        assert_eq!(simplified("2x + 3x - 5x"), "0");
        assert_eq!(simplified("x/2 + x/3"), "5x/6");
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(simplified("x * x^2 * y"), "x^3*y");
        assert_eq!(simplified("x/x"), "1");
        assert_eq!(simplified("2 * 3 * 4"), "24");
    }

    #[test]
    fn fractions() {
        assert_eq!(simplified("6/8"), "3/4");
        assert_eq!(simplified("1/2 + 1/3"), "5/6");
        assert_eq!(simplified("4/2"), "2");
        assert_eq!(simplified("3/(-6)"), "-1/2");
    }

    #[test]
    fn powers() {
        assert_eq!(simplified("x^0"), "1");
        assert_eq!(simplified("(x - 1)^0"), "1");
        assert_eq!(simplified("0^3"), "0");
        assert_eq!(simplified("1^x"), "1");
        assert_eq!(simplified("x^1"), "x");
        assert_eq!(simplified("(x^2)^3"), "x^6");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("2^-3"), "1/8");
    }

    #[test]
    fn expand_products() {
        assert_eq!(simplified("2(x + 1)"), "2x + 2");
        assert_eq!(simplified("(x + 1)(x - 1)"), "x^2 - 1");
        assert_eq!(simplified("(x - 1)^3"), "x^3 - 3x^2 + 3x - 1");
        assert_eq!(simplified("(2x)^2"), "4x^2");
    }

    #[test]
    fn taylor_terms() {
        assert_eq!(simplified("(0) * (x - (0))^0 / 1 + (1) * (x - (0))^1 / 1"), "x");
        assert_eq!(
            simplified("(1) * (x - (1))^1 / 1 + (-1) * (x - (1))^2 / 2"),
            "-x^2/2 + 2x - 3/2",
        );
    }

    #[test]
    fn floats() {
        assert_eq!(simplified("0.5 + 1/4"), "0.75");
        assert_eq!(simplified("0.5 * 4"), "2");
        assert_eq!(simplified("0.5x + x"), "1.5x");
        assert_eq!(simplified("2.5^2"), "6.25");
    }

    #[test]
    fn calls() {
        assert_eq!(simplified("cos(0) + sin(0)"), "1");
        assert_eq!(simplified("sqrt(4)x"), "2x");
        // exact arguments are kept exact
        assert_eq!(simplified("sin(1)"), "sin(1)");
        // non-finite results are left alone
        assert_eq!(simplified("ln(0)"), "ln(0)");
        assert_eq!(simplified("sin(2x - x)"), "sin(x)");
    }

    #[test]
    fn constant_coefficients() {
        assert_eq!(simplified("a*x + 2a*x"), "3a*x");
        assert_eq!(simplified("x*y - y*x"), "0");
    }

    #[test]
    fn steps() {
        let (expr, steps) = simplify_with_steps(&parse_expr("x + 0"));
        assert_eq!(expr, SymExpr::symbol("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }

    #[test]
    fn only_given_rules() {
        let expr = simplify_with(&parse_expr("x + 0 + x"), |expr, steps| {
            rules::first_applicable(expr, &[(rules::add::add_zero as rules::Rule, Step::AddZero)], steps)
        });
        assert_eq!(expr.to_string(), "x + x");
    }
}
