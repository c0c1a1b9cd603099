use ariadne::Fmt;
use taylor_attrs::ErrorKind;
use taylor_error::EXPR;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("an {} is missing here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The expression ended, but more text follows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = ["this text does not continue the expression"],
    help = "check for a missing operator or a misplaced symbol",
)]
pub struct ExpectedEof;

/// An operand was expected, such as a number, a symbol, a call or a parenthesized expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an {}, found `{}`", "expression".fg(EXPR), found),
    labels = ["here"],
)]
pub struct ExpectedExpr {
    pub found: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if *opening { "this parenthesis is never closed" } else { "this parenthesis was never opened" }],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// True for an opening `(` without a match, false for a stray `)`.
    pub opening: bool,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;
