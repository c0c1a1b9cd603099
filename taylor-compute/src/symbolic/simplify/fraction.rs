//! Exact fractions, which are written as an integer times the reciprocal of an integer.

use crate::primitive::int;
use crate::symbolic::expr::{Primary, SymExpr};
use rug::Integer;

/// Returns `numerator * denominator^-1`, the form every division takes.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * SymExpr::pow(denominator, SymExpr::integer(-1))
}

/// Removes the first integer factor and the first integer reciprocal (`n^-1`) from the factors of
/// a product. Either part is [`None`] if the product has no such factor.
fn take_integer_parts(factors: &mut Vec<SymExpr>) -> (Option<Integer>, Option<Integer>) {
    let numerator = factors.iter()
        .position(SymExpr::is_integer)
        .and_then(|idx| factors.remove(idx).into_integer());
    let denominator = factors.iter()
        .position(SymExpr::is_integer_recip)
        .and_then(|idx| factors.remove(idx).into_integer_recip());
    (numerator, denominator)
}

/// Takes the integer fraction `n * d^-1` out of the factors of a product, returning `(n, d)`.
/// Returns [`None`] unless both parts are present.
pub(crate) fn extract_integer_fraction(factors: &mut Vec<SymExpr>) -> Option<(Integer, Integer)> {
    match take_integer_parts(factors) {
        (Some(numerator), Some(denominator)) => Some((numerator, denominator)),
        _ => None,
    }
}

/// Takes the numeric coefficient out of the factors of a product.
///
/// A float factor is the coefficient by itself. Otherwise the integer factor and the integer
/// reciprocal factor make up the coefficient, whichever of them are present.
pub(crate) fn extract_fractional(factors: &mut Vec<SymExpr>) -> Option<SymExpr> {
    if let Some(idx) = factors.iter().position(SymExpr::is_float) {
        return Some(factors.remove(idx));
    }

    match take_integer_parts(factors) {
        (None, None) => None,
        (numerator, denominator) => Some(integer_fraction(
            numerator.unwrap_or_else(|| int(1)),
            denominator.unwrap_or_else(|| int(1)),
        )),
    }
}

/// Reads an exact coefficient as `(numerator, denominator)`, taking it out of `expr`.
///
/// An integer `n` reads as `n/1` and a reciprocal `d^-1` as `1/d`. A product needs an integer
/// factor, and reads as that integer over its integer reciprocal factor, if any. Anything else,
/// floats included, gives [`None`].
pub(crate) fn extract_explicit_frac(expr: &mut SymExpr) -> Option<(Integer, Integer)> {
    match expr {
        SymExpr::Primary(Primary::Integer(num)) => {
            Some((std::mem::replace(num, int(1)), int(1)))
        },
        SymExpr::Mul(factors) => match take_integer_parts(factors) {
            (Some(numerator), denominator) => Some((numerator, denominator.unwrap_or_else(|| int(1)))),
            _ => None,
        },
        SymExpr::Exp(..) if expr.is_integer_recip() => {
            let denominator = std::mem::replace(expr, SymExpr::integer(1)).into_integer_recip()?;
            Some((int(1), denominator))
        },
        _ => None,
    }
}

/// Creates the expression for the exact fraction `numerator / denominator`, in the canonical
/// form: an integer if the denominator is 1, otherwise [`make_fraction`].
pub(crate) fn integer_fraction(numerator: Integer, denominator: Integer) -> SymExpr {
    if denominator == 1 {
        SymExpr::Primary(Primary::Integer(numerator))
    } else if numerator == 1 {
        SymExpr::pow(SymExpr::Primary(Primary::Integer(denominator)), SymExpr::integer(-1))
    } else {
        make_fraction(
            SymExpr::Primary(Primary::Integer(numerator)),
            SymExpr::Primary(Primary::Integer(denominator)),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integer_fraction_from_factors() {
        let mut factors = vec![
            SymExpr::symbol("x"),
            SymExpr::integer(3),
            SymExpr::pow(SymExpr::integer(4), SymExpr::integer(-1)),
        ];
        assert_eq!(extract_integer_fraction(&mut factors), Some((int(3), int(4))));
        assert_eq!(factors, vec![SymExpr::symbol("x")]);
    }

    #[test]
    fn coefficient_parts() {
        let mut factors = vec![SymExpr::integer(2), SymExpr::symbol("x")];
        assert_eq!(extract_integer_fraction(&mut factors.clone()), None);
        assert_eq!(extract_fractional(&mut factors), Some(SymExpr::integer(2)));
        assert_eq!(factors, vec![SymExpr::symbol("x")]);

        let mut factors = vec![SymExpr::symbol("x"), SymExpr::pow(SymExpr::integer(3), SymExpr::integer(-1))];
        assert_eq!(extract_fractional(&mut factors), Some(SymExpr::pow(SymExpr::integer(3), SymExpr::integer(-1))));
        assert_eq!(extract_fractional(&mut vec![SymExpr::symbol("y")]), None);
    }

    #[test]
    fn explicit_fraction() {
        let mut expr = SymExpr::pow(SymExpr::integer(5), SymExpr::integer(-1));
        assert_eq!(extract_explicit_frac(&mut expr), Some((int(1), int(5))));
        assert_eq!(expr, SymExpr::integer(1));

        let mut float = SymExpr::Primary(Primary::Float(crate::primitive::float(0.5)));
        assert_eq!(extract_explicit_frac(&mut float), None);
    }
}
