//! Functions related to powers, exponentiation, and roots.

use crate::primitive::float;
use rug::Float;

/// Builds a function of one argument whose `rug` implementation has the same name.
macro_rules! simple {
    ($($name:ident; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            pub fn $name(args: &[Float]) -> Float {
                match args {
                    [n] => n.clone().$name(),
                    _ => float(f64::NAN),
                }
            }
        )*
    };
}

simple! {
    exp; "The exponential function, `e^x`.",
    ln; "The natural logarithm.",
    sqrt; "The principal square root. Negative inputs give NaN.",
    cbrt; "The real cube root.",
    abs; "The absolute value.",
}

/// The logarithm function to an arbitrary base, `log(x, base)`. Without a base, this is the
/// natural logarithm.
pub fn log(args: &[Float]) -> Float {
    match args {
        [n] => n.clone().ln(),
        [n, base] => n.clone().ln() / base.clone().ln(),
        _ => float(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn logarithms() {
        assert_float_absolute_eq!(log(&[float(8), float(2)]).to_f64(), 3.0);
        assert_float_absolute_eq!(log(&[float(1)]).to_f64(), 0.0);
        assert!(ln(&[float(0)]).is_infinite());
    }

    #[test]
    fn roots() {
        assert_eq!(sqrt(&[float(4)]), 2.0);
        assert_eq!(cbrt(&[float(-27)]), -3.0);
        assert!(sqrt(&[float(-1)]).is_nan());
    }
}
