//! All built-in functions that may appear in the function text.
//!
//! Each function is a plain Rust function over [`Float`]s, registered in a table of [`Builtin`]s
//! together with the number of arguments it accepts. The table is used by the parser front-end to
//! reject unknown functions, by the simplifier to fold numeric calls, and by the numerical
//! evaluator.
//!
//! # Example
//!
//! ```
//! use taylor_compute::funcs;
//! use taylor_compute::primitive::float;
//!
//! let sin = funcs::get("sin").unwrap();
//! assert!(sin.accepts(1));
//! assert_eq!((sin.eval)(&[float(0)]), 0.0);
//!
//! assert_eq!(funcs::similar_names("son"), vec!["sin"]);
//! ```

pub mod combinatoric;
pub mod power;
pub mod trigonometry;

use crate::numerical::error::{UndefinedFunction, WrongArgumentCount};
use once_cell::sync::Lazy;
use rug::Float;
use std::collections::HashMap;
use taylor_error::Error;

/// A function that can be called by name.
#[derive(Debug)]
pub struct Builtin {
    /// The name of the function.
    pub name: &'static str,

    /// The minimum number of arguments.
    pub min_args: usize,

    /// The maximum number of arguments.
    pub max_args: usize,

    /// Evaluates the function. The number of arguments must be accepted by [`Builtin::accepts`];
    /// otherwise the result is NaN.
    pub eval: fn(&[Float]) -> Float,
}

impl Builtin {
    /// Returns true if the function can be called with the given number of arguments.
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_args..=self.max_args).contains(&count)
    }

    /// Describes the accepted number of arguments, such as `1` or `1 or 2`.
    pub fn arity(&self) -> String {
        if self.min_args == self.max_args {
            self.min_args.to_string()
        } else {
            format!("{} or {}", self.min_args, self.max_args)
        }
    }
}

/// Returns a table of all builtin functions.
fn all() -> HashMap<&'static str, Builtin> {
    use power::*;
    use trigonometry::*;

    macro_rules! build {
        ($($name:ident $min:literal $max:literal),* $(,)?) => {
            [
                $(
                    (stringify!($name), Builtin {
                        name: stringify!($name),
                        min_args: $min,
                        max_args: $max,
                        eval: $name,
                    }),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        sin 1 1,
        cos 1 1,
        tan 1 1,
        asin 1 1,
        acos 1 1,
        atan 1 1,
        sinh 1 1,
        cosh 1 1,
        tanh 1 1,
        exp 1 1,
        ln 1 1,
        log 1 2,
        sqrt 1 1,
        cbrt 1 1,
        abs 1 1,
    }
}

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(all);

/// Returns the builtin function with the given name.
pub fn get(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}

/// Returns the builtin function with the given name if it accepts `arg_count` arguments.
///
/// The returned errors have no spans.
pub fn check_call(name: &str, arg_count: usize) -> Result<&'static Builtin, Error> {
    let builtin = get(name).ok_or_else(|| Error::new(Vec::new(), UndefinedFunction {
        name: name.to_owned(),
        suggestions: similar_names(name),
    }))?;

    if builtin.accepts(arg_count) {
        Ok(builtin)
    } else {
        Err(Error::new(Vec::new(), WrongArgumentCount {
            name: name.to_owned(),
            expected: builtin.arity(),
            given: arg_count,
        }))
    }
}

/// Returns the names of builtin functions that are spelled similarly to the given name, in
/// alphabetical order.
pub fn similar_names(name: &str) -> Vec<&'static str> {
    let mut names = BUILTINS.keys()
        .copied()
        .filter(|builtin| levenshtein::levenshtein(builtin, name) < 2)
        .collect::<Vec<_>>();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::primitive::float;

    #[test]
    fn arity() {
        let log = get("log").unwrap();
        assert!(log.accepts(1) && log.accepts(2) && !log.accepts(3));
        assert_eq!(log.arity(), "1 or 2");
        assert_eq!(get("sqrt").unwrap().arity(), "1");
    }

    #[test]
    fn unknown_function() {
        assert!(get("foo").is_none());
        assert_eq!(similar_names("cso"), Vec::<&str>::new());
        assert_eq!(similar_names("cosj"), vec!["cos", "cosh"]);
    }

    #[test]
    fn wrong_argument_count_is_nan() {
        assert!((get("sin").unwrap().eval)(&[float(1), float(2)]).is_nan());
    }
}
