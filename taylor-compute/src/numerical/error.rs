//! Errors that can occur while evaluating or differentiating an expression.
//!
//! Symbolic expressions do not remember where they came from in the source text, so these errors
//! are created without spans. Callers that know the source text attach spans with
//! [`Error::with_spans`](taylor_error::Error::with_spans).

use ariadne::Fmt;
use taylor_attrs::ErrorKind;
use taylor_error::EXPR;

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", self.name),
    labels = ["this variable"],
    help = format!(
        "declare it as a variable and give it an expansion point, such as {}",
        format!("{}=0", self.name).fg(EXPR),
    ),
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "the available functions are: sin cos tan asin acos atan sinh cosh tanh exp ln log sqrt cbrt abs".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", self.suggestions[0].fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|name| format!("`{}`", name.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// Builtin functions with similar names.
    pub suggestions: Vec<&'static str>,
}

/// The function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments to the `{}` function", self.name),
    labels = [format!("this call has {} argument(s)", self.given)],
    help = format!("the `{}` function takes {} argument(s)", self.name.fg(EXPR), self.expected),
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// A description of the accepted number of arguments.
    pub expected: String,

    /// The number of arguments given.
    pub given: usize,
}

/// Zero was raised to a negative power.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("division by zero in `{}`", self.expr),
    labels = ["this expression"],
    help = "the function or one of its derivatives is not defined at the expansion point",
)]
pub struct DivisionByZero {
    /// The expression that divides by zero.
    pub expr: String,
}

/// The result is infinite, or not a real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a finite real number", self.expr),
    labels = ["this expression"],
    help = "the function or one of its derivatives is not defined at the expansion point",
)]
pub struct NonFinite {
    /// The expression that evaluated to a non-finite value.
    pub expr: String,
}

/// The derivative of the expression cannot be computed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", self.expr),
    labels = ["this expression"],
)]
pub struct Underivable {
    /// The expression that could not be differentiated.
    pub expr: String,
}
