use crate::parser::{ast::{expr::Expr, literal::LitSym}, fmt::Latex};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A call to a named function, such as `sin(x)` or `log(x, 2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    pub name: LitSym,
    pub args: Vec<Expr>,

    /// The span from the start of the name to the closing parenthesis.
    pub span: Range<usize>,

    /// The span of the argument list, parentheses included.
    pub paren_span: Range<usize>,
}

impl Call {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the spans that frame the arguments: the name with the opening parenthesis, and the
    /// closing parenthesis. Errors about the call itself point at these, leaving the arguments
    /// unmarked.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        let Range { start, end } = self.paren_span;
        [self.name.span.start..start + 1, end - 1..end]
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

/// Writes the arguments, separated by commas.
fn fmt_args(f: &mut fmt::Formatter, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        arg.innermost().fmt_latex(f)?;
    }
    Ok(())
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.name.name.as_str();
        let (open, close) = match (name, self.args.len()) {
            ("sqrt", 1) => ("\\sqrt{", "}"),
            ("cbrt", 1) => ("\\sqrt[3]{", "}"),
            ("abs", 1) => ("\\left|", "\\right|"),
            ("exp", 1) => ("e^{", "}"),
            _ => {
                match name {
                    "sin" | "cos" | "tan" | "sinh" | "cosh" | "tanh" | "ln" | "log" => write!(f, "\\{}", name)?,
                    "asin" | "acos" | "atan" => write!(f, "\\arc{}", &name[1..])?,
                    _ => write!(f, "\\mathrm{{ {} }}", name)?,
                }
                ("\\left(", "\\right)")
            },
        };

        f.write_str(open)?;
        fmt_args(f, &self.args)?;
        f.write_str(close)
    }
}
