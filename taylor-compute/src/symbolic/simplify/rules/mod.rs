//! The rewrite rules used by the simplifier.
//!
//! A [`Rule`] looks at a single node and returns the rewritten node if it applies. Each family of
//! rules lists its rules in a table, paired with the [`Step`] that is reported when the rule
//! fires, and exposes an `all` function that tries the table in order.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod numeric;
pub mod power;

use crate::symbolic::step_collector::StepCollector;
use super::{step::Step, SymExpr};

/// A rewrite of one node of an expression.
pub type Rule = fn(&SymExpr) -> Option<SymExpr>;

/// Applies the first rule of the table that matches the expression, and reports its step.
pub(crate) fn first_applicable(
    expr: &SymExpr,
    table: &[(Rule, Step)],
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<SymExpr> {
    table.iter().find_map(|&(rule, step)| {
        let rewritten = rule(expr)?;
        step_collector.push(step);
        Some(rewritten)
    })
}

/// Applies all rules.
///
/// The families that shrink the expression go first. Distribution can grow it, and float folding
/// is a last resort, so that exact arithmetic wins whenever it applies.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
        .or_else(|| numeric::all(expr, step_collector))
}
