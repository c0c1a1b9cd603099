//! Functions to construct [`Integer`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
///
/// The tokenizer only produces digit strings for integer literals, so this cannot fail on parser
/// output; anything else yields zero.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap_or_default()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `3.14`, `.5`, `2.` or `1e-3`.
///
/// Returns NaN if the string is not a number.
pub fn float_from_str(s: &str) -> Float {
    // rug rejects a bare trailing dot before an exponent, e.g. `2.e3`
    let normalized = s.replacen(".e", ".0e", 1).replacen(".E", ".0E", 1);
    match Float::parse(&normalized) {
        Ok(parsed) => Float::with_val(PRECISION, parsed),
        Err(_) => float(f64::NAN),
    }
}

/// Formats an `f64` as a decimal literal that the tokenizer reads back as the same value, such as
/// `0.5`, `2.0` or `1.0e-7`.
///
/// The shortest representation is used, with a fractional part inserted before any exponent.
pub fn float_literal(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.find('e') {
        Some(idx) if !repr[..idx].contains('.') => format!("{}.0{}", &repr[..idx], &repr[idx..]),
        _ => repr,
    }
}

/// Returns true if the [`Float`] is finite and has no fractional part.
pub fn is_integral(f: &Float) -> bool {
    f.is_finite() && f.is_integer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_forms() {
        assert_eq!(float_from_str("3.25"), 3.25);
        assert_eq!(float_from_str(".5"), 0.5);
        assert_eq!(float_from_str("2."), 2.0);
        assert_eq!(float_from_str("2.e1"), 20.0);
        assert_eq!(float_from_str("1e-3").to_f64(), 0.001);
        assert!(float_from_str("abc").is_nan());
    }

    #[test]
    fn integers() {
        assert_eq!(int_from_str("1234567890123456789012"), int(1234567890123456789012_i128));
        assert!(is_integral(&float(4)));
        assert!(!is_integral(&float(0.5)));
        assert!(!is_integral(&float(f64::INFINITY)));
    }

    #[test]
    fn literals() {
        assert_eq!(float_literal(0.5), "0.5");
        assert_eq!(float_literal(2.0), "2.0");
        assert_eq!(float_literal(1e-7), "1.0e-7");
        assert_eq!(float_literal(-2.5e20), "-2.5e20");
        assert_eq!(float_literal_roundtrip(1e-7), 1e-7);
    }

    fn float_literal_roundtrip(value: f64) -> f64 {
        float_from_str(&float_literal(value)).to_f64()
    }
}
