//! Trigonometric and hyperbolic functions, in radians.

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
    sin; "Sine.",
    cos; "Cosine.",
    tan; "Tangent.",
    asin; "Inverse sine, in `[-pi/2, pi/2]`.",
    acos; "Inverse cosine, in `[0, pi]`.",
    atan; "Inverse tangent, in `(-pi/2, pi/2)`.",
    sinh; "Hyperbolic sine.",
    cosh; "Hyperbolic cosine.",
    tanh; "Hyperbolic tangent.",
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn known_values() {
        assert_float_absolute_eq!(sin(&[float(0.5)]).to_f64(), 0.5f64.sin());
        assert_float_absolute_eq!(acos(&[float(-1)]).to_f64(), std::f64::consts::PI);
        assert_float_absolute_eq!(tanh(&[float(1)]).to_f64(), 1f64.tanh());
        assert!(asin(&[float(2)]).is_nan());
    }
}
