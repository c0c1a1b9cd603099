/// A step taken by the simplifier. Each variant is named after the rule that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `a+a = 2a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `3/12 = 1/4`
    ReduceFraction,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`, for positive `a`
    PowerZeroLeft,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    PowerOneLeft,

    /// `(a^b)^c = a^(b*c)`, for integer `c`
    PowerPower,

    /// `2^3 = 8`
    /// `2^-3 = 1/8`
    IntegerPower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c * b^c`
    DistributePower,

    /// `(a+b)^2 = a^2 + 2*a*b + b^2`
    ExpandPower,

    /// `0.5 + 1/4 = 0.75`
    FoldFloats,

    /// `2.0 = 2`
    IntegralFloat,

    /// `cos(0) = 1`
    EvaluateCall,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::ReduceFraction => "reduce fraction",
            Self::CombineLikeFactors => "combine like factors",
            Self::PowerZero => "raise to the power of zero",
            Self::PowerZeroLeft => "raise zero to a power",
            Self::PowerOne => "raise to the power of one",
            Self::PowerOneLeft => "raise one to a power",
            Self::PowerPower => "multiply nested exponents",
            Self::IntegerPower => "evaluate integer power",
            Self::DistributiveProperty => "distribute multiplication over addition",
            Self::DistributePower => "distribute power over multiplication",
            Self::ExpandPower => "expand power of a sum",
            Self::FoldFloats => "fold decimal numbers",
            Self::IntegralFloat => "convert whole decimal to integer",
            Self::EvaluateCall => "evaluate function",
        };
        write!(f, "{}", description)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{de::{value::{Error, StrDeserializer}, IntoDeserializer}, Deserialize};
    use super::*;

    #[test]
    fn steps_by_name() {
        let deserializer: StrDeserializer<Error> = "ReduceFraction".into_deserializer();
        assert_eq!(Step::deserialize(deserializer).unwrap(), Step::ReduceFraction);

        let deserializer: StrDeserializer<Error> = "Factor".into_deserializer();
        assert!(Step::deserialize(deserializer).is_err());
    }
}
