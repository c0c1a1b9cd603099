use crate::consts;
use crate::primitive::float;
use crate::symbolic::expr::{Primary, SymExpr};
use rug::Integer;
use std::collections::HashMap;

/// Integral values beyond this magnitude are not exactly representable by an `f64`, so binding
/// them keeps them as floats.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// A context to use when evaluating an expression, containing the values of variables.
///
/// The constants `e`, `phi`, `pi` and `tau` are always available, unless a variable of the same
/// name is bound.
#[derive(Debug, Clone, Default)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, SymExpr>,
}

impl Ctxt {
    /// Creates a new context with no bound variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable to the given value, replacing any previous binding.
    ///
    /// Bound values are evaluated on their own, so they cannot refer to other variables.
    pub fn add_var(&mut self, name: &str, value: SymExpr) {
        self.vars.insert(name.to_owned(), value);
    }

    /// Binds a variable to the given number. Integral values are bound as exact integers, and
    /// anything else as a float.
    pub fn bind(&mut self, name: &str, value: f64) {
        let exact = if value.fract() == 0.0 && value.abs() <= MAX_EXACT_F64 {
            Integer::from_f64(value).map(Primary::Integer)
        } else {
            None
        };
        let number = exact.unwrap_or_else(|| Primary::Float(float(value)));
        self.add_var(name, SymExpr::Primary(number));
    }

    /// Returns the value of the variable with the given name, or the value of the constant with
    /// that name.
    pub fn get_var(&self, name: &str) -> Option<SymExpr> {
        self.vars.get(name).cloned().or_else(|| {
            consts::get(name).map(|value| SymExpr::Primary(Primary::Float(value.clone())))
        })
    }

    /// Returns true if a variable with the given name is bound. Constants are not bound variables.
    pub fn is_bound(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Ctxt {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut ctxt = Self::new();
        for (name, value) in iter {
            ctxt.bind(name.as_ref(), value);
        }
        ctxt
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integral_values_are_exact() {
        let ctxt = [("x", 2.0), ("y", -0.5), ("z", 1e300)].into_iter().collect::<Ctxt>();
        assert_eq!(ctxt.get_var("x"), Some(SymExpr::integer(2)));
        assert!(ctxt.get_var("y").is_some_and(|y| y.is_float()));
        assert!(ctxt.get_var("z").is_some_and(|z| z.is_float()));
        assert_eq!(ctxt.get_var("w"), None);
    }

    #[test]
    fn constants_can_be_shadowed() {
        let mut ctxt = Ctxt::new();
        assert!(ctxt.get_var("pi").is_some_and(|pi| pi.is_float()));
        assert!(!ctxt.is_bound("pi"));

        ctxt.bind("pi", 3.0);
        assert_eq!(ctxt.get_var("pi"), Some(SymExpr::integer(3)));
    }
}
