//! Conversion of [`SymExpr`]s back into ASTs, so that they can be displayed and typeset.
//!
//! The flattened form loses the operators the user wrote. When rendering, terms with a negative
//! coefficient are written with `-`, factors with a negative integer exponent are moved into a
//! denominator, and parentheses are inserted wherever precedence requires them. Terms are ordered
//! by descending degree, with constants last, and numeric coefficients are written first.

use rug::{Float, Integer};
use std::cmp::Reverse;
use crate::primitive::float_literal;
use super::{Primary, SymExpr};
use taylor_parser::parser::{
    ast::{Binary, Call, Expr as AstExpr, LitFloat, LitInt, LitSym, Literal, Paren, Unary},
    op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind},
    Precedence,
};

/// Returns the precedence of a rendered node, or [`None`] if the node never needs parentheses.
fn precedence(expr: &AstExpr) -> Option<Precedence> {
    match expr {
        AstExpr::Literal(_) | AstExpr::Call(_) | AstExpr::Paren(_) => None,
        AstExpr::Unary(unary) => Some(unary.op.precedence()),
        AstExpr::Binary(binary) => Some(binary.op.precedence()),
    }
}

/// Wraps the expression in parentheses if its precedence is accepted by `needs_paren`.
fn wrap_if(expr: AstExpr, needs_paren: impl Fn(Precedence) -> bool) -> AstExpr {
    match precedence(&expr) {
        Some(prec) if needs_paren(prec) => AstExpr::Paren(Paren {
            expr: Box::new(expr),
            span: 0..0,
        }),
        _ => expr,
    }
}

fn binary(lhs: AstExpr, kind: BinOpKind, rhs: AstExpr) -> AstExpr {
    // a coefficient is written next to the factor it multiplies, as in `3x`
    let implicit = kind == BinOpKind::Mul
        && matches!(&lhs, AstExpr::Literal(literal) if literal.is_numeric())
        && matches!(
            rhs.leftmost(),
            AstExpr::Literal(Literal::Symbol(_)) | AstExpr::Call(_) | AstExpr::Paren(_)
        );

    AstExpr::Binary(Binary {
        lhs: Box::new(lhs),
        op: BinOp { kind, implicit, span: 0..0 },
        rhs: Box::new(rhs),
        span: 0..0,
    })
}

fn negate(expr: AstExpr) -> AstExpr {
    AstExpr::Unary(Unary {
        operand: Box::new(wrap_if(expr, |prec| prec <= Precedence::Term)),
        op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..0 },
        span: 0..0,
    })
}

/// Formats a non-negative float so that it is read back as a float.
fn fmt_float(float: &Float) -> String {
    let value = float.to_f64();
    if value.is_finite() {
        float_literal(value)
    } else {
        float.to_string_radix(10, Some(17))
    }
}

/// Returns true if the expression is a negative number.
fn is_negative_number(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) => *int < 0,
        SymExpr::Primary(Primary::Float(float)) => *float < 0,
        _ => false,
    }
}

/// Separates the sign of the expression from its magnitude. Products are negative if one of
/// their numeric factors is.
fn split_sign(expr: SymExpr) -> (bool, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) if int < 0 => {
            (true, SymExpr::Primary(Primary::Integer(-int)))
        },
        SymExpr::Primary(Primary::Float(float)) if float < 0 => {
            (true, SymExpr::Primary(Primary::Float(-float)))
        },
        SymExpr::Mul(mut factors) => match factors.iter().position(is_negative_number) {
            Some(idx) => {
                let (_, magnitude) = split_sign(factors.remove(idx));
                if !magnitude.is_integer_value(1) {
                    factors.insert(idx, magnitude);
                }
                (true, SymExpr::Mul(factors).downgrade())
            },
            None => (false, SymExpr::Mul(factors)),
        },
        expr => (false, expr),
    }
}

/// The degree of the expression, used to order terms. Anything containing a symbol counts at
/// least once.
fn degree(expr: &SymExpr) -> i64 {
    match expr {
        SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => 0,
        SymExpr::Primary(Primary::Symbol(_)) => 1,
        SymExpr::Primary(Primary::Call(..)) => i64::from(expr.post_order_iter().symbols().next().is_some()),
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or(0),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        SymExpr::Exp(base, exp) => match exp.as_integer().and_then(|exp| exp.to_i64()) {
            Some(exp) => degree(base).saturating_mul(exp),
            None => degree(base),
        },
    }
}

/// Orders terms by descending degree, so that constants come last.
fn sort_terms(terms: &mut [SymExpr]) {
    terms.sort_by_cached_key(|term| {
        let first_symbol = term.post_order_iter().symbols().next().map(str::to_owned);
        (Reverse(degree(term)), first_symbol, term.to_string())
    });
}

/// Orders factors so that numbers come first, then symbols and their powers, then function calls,
/// and then everything else.
fn sort_factors(factors: &mut [SymExpr]) {
    fn rank(factor: &SymExpr) -> (u8, &str) {
        match factor {
            SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => (0, ""),
            SymExpr::Primary(Primary::Symbol(name)) => (1, name),
            SymExpr::Primary(Primary::Call(name, _)) => (2, name),
            SymExpr::Exp(base, _) => {
                let (rank, name) = rank(base);
                (rank.max(1), name)
            },
            _ => (3, ""),
        }
    }

    factors.sort_by(|a, b| rank(a).cmp(&rank(b)));
}

/// Renders the product of the given factors, writing `1` for an empty product.
fn render_product(mut factors: Vec<SymExpr>) -> AstExpr {
    sort_factors(&mut factors);
    if factors.len() > 1 {
        factors.retain(|factor| !factor.is_integer_value(1));
    }

    let mut iter = factors.into_iter();
    let Some(first) = iter.next() else {
        return AstExpr::Literal(Literal::Integer(LitInt { value: "1".to_string(), span: 0..0 }));
    };

    let mut product = wrap_if(AstExpr::from(first), |prec| prec < Precedence::Factor);
    for factor in iter {
        let rhs = wrap_if(AstExpr::from(factor), |prec| prec < Precedence::Exp);
        product = binary(product, BinOpKind::Mul, rhs);
    }
    product
}

/// Renders a product, moving factors with negative integer exponents into a denominator.
fn render_fraction(factors: Vec<SymExpr>) -> AstExpr {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        let flipped = match &factor {
            SymExpr::Exp(_, exp) => exp.as_integer()
                .filter(|exp| **exp < 0)
                .map(|exp| Integer::from(-exp)),
            _ => None,
        };

        match (factor, flipped) {
            (SymExpr::Exp(base, _), Some(exp)) if exp == 1 => denominator.push(*base),
            (SymExpr::Exp(base, _), Some(exp)) => {
                denominator.push(SymExpr::Exp(base, Box::new(SymExpr::integer(exp))));
            },
            (factor, _) => numerator.push(factor),
        }
    }

    let numerator = render_product(numerator);
    if denominator.is_empty() {
        numerator
    } else {
        let denominator = wrap_if(render_product(denominator), |prec| prec < Precedence::Exp);
        binary(numerator, BinOpKind::Div, denominator)
    }
}

fn render_sum(mut terms: Vec<SymExpr>) -> AstExpr {
    sort_terms(&mut terms);

    let mut iter = terms.into_iter();
    let Some(first) = iter.next() else {
        return AstExpr::Literal(Literal::Integer(LitInt { value: "0".to_string(), span: 0..0 }));
    };

    let mut sum = AstExpr::from(first);
    for term in iter {
        let (negative, magnitude) = split_sign(term);
        let rhs = wrap_if(render_magnitude(magnitude), |prec| prec <= Precedence::Term || prec == Precedence::Neg);
        let kind = if negative { BinOpKind::Sub } else { BinOpKind::Add };
        sum = binary(sum, kind, rhs);
    }
    sum
}

/// Renders an expression whose sign has already been split off.
fn render_magnitude(expr: SymExpr) -> AstExpr {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) => AstExpr::Literal(Literal::Integer(LitInt {
            value: int.to_string(),
            span: 0..0,
        })),
        SymExpr::Primary(Primary::Float(float)) => AstExpr::Literal(Literal::Float(LitFloat {
            value: fmt_float(&float),
            span: 0..0,
        })),
        SymExpr::Primary(Primary::Symbol(name)) => AstExpr::Literal(Literal::Symbol(LitSym {
            name,
            span: 0..0,
        })),
        SymExpr::Primary(Primary::Call(name, args)) => AstExpr::Call(Call {
            name: LitSym { name, span: 0..0 },
            args: args.into_iter().map(AstExpr::from).collect(),
            span: 0..0,
            paren_span: 0..0,
        }),
        SymExpr::Add(terms) => render_sum(terms),
        SymExpr::Mul(factors) => render_fraction(factors),
        SymExpr::Exp(base, exp) if exp.as_integer().is_some_and(|exp| *exp < 0) => {
            render_fraction(vec![SymExpr::Exp(base, exp)])
        },
        SymExpr::Exp(base, exp) => {
            let base = wrap_if(AstExpr::from(*base), |_| true);
            let exp = wrap_if(AstExpr::from(*exp), |prec| prec < Precedence::Exp);
            binary(base, BinOpKind::Exp, exp)
        },
    }
}

impl From<SymExpr> for AstExpr {
    fn from(expr: SymExpr) -> Self {
        let (negative, magnitude) = split_sign(expr);
        let rendered = render_magnitude(magnitude);
        if negative {
            negate(rendered)
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::tests::parse_expr;
    use taylor_parser::parser::fmt::Latex;

    #[test]
    fn polynomial_order() {
        let expr = parse_expr("1 + 3x + x^2");
        assert_eq!(expr.to_string(), "x^2 + 3x + 1");
    }

    #[test]
    fn negative_terms() {
        let expr = parse_expr("x - x^3/6");
        assert_eq!(expr.to_string(), "-x^3/6 + x");
    }

    #[test]
    fn leading_negative_coefficient() {
        assert_eq!(parse_expr("-2x").to_string(), "-2x");
        assert_eq!(parse_expr("-(x + 1)").to_string(), "-(x + 1)");
    }

    #[test]
    fn fractions() {
        assert_eq!(parse_expr("3/2").to_string(), "3/2");
        assert_eq!(parse_expr("x/(2y)").to_string(), "x/(2y)");
        assert_eq!(parse_expr("1/x^2").to_string(), "1/x^2");
    }

    #[test]
    fn parenthesized_bases_and_exponents() {
        assert_eq!(parse_expr("(x - 1)^2").to_string(), "(x - 1)^2");
        assert_eq!(parse_expr("x^(1/2)").to_string(), "x^(1/2)");
        assert_eq!(parse_expr("(-2)^x").to_string(), "(-2)^x");
    }

    #[test]
    fn factor_order() {
        assert_eq!(parse_expr("sin(x) * y * 4").to_string(), "4y*sin(x)");
    }

    #[test]
    fn floats_stay_floats() {
        assert_eq!(parse_expr("0.5x").to_string(), "0.5x");
        assert_eq!(SymExpr::Primary(Primary::Float(crate::primitive::float(2))).to_string(), "2.0");
    }

    #[test]
    fn output_reparses() {
        for input in ["x^2 - 2x*y + 3", "-x^3/6 + x", "2(x - 1)^2/3", "sin(-x)*exp(2x)"] {
            let expr = parse_expr(input);
            assert_eq!(parse_expr(&expr.to_string()), parse_expr(&parse_expr(&expr.to_string()).to_string()));
        }
    }

    #[test]
    fn latex() {
        let ast = AstExpr::from(parse_expr("x^2/2 + 3x"));
        assert_eq!(ast.as_display().to_string(), "\\frac{x^{2}}{2} + 3x");
    }
}
