use std::fmt::{Display, Formatter, Result};
use super::{ast::expr::Expr, Precedence};

/// Formatting as LaTeX math.
pub trait Latex {
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Returns a value whose [`Display`] output is the LaTeX form of `self`.
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: Latex + ?Sized> Display for LatexFormatter<'_, T> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Writes `base^{exp}`. The base keeps parentheses if it would otherwise read differently, as
/// with `\left(-x\right)^{2}` or `\left(\sin\left(x\right)\right)^{2}`.
pub fn fmt_power(f: &mut Formatter, base: &Expr, exp: &Expr) -> Result {
    let base = base.innermost();
    let grouped = match base {
        Expr::Unary(_) => true,
        Expr::Binary(binary) => binary.op.precedence() <= Precedence::Exp,
        // roots and absolute values are delimited already
        Expr::Call(call) => !matches!(call.name.name.as_str(), "sqrt" | "cbrt" | "abs"),
        Expr::Literal(_) | Expr::Paren(_) => false,
    };

    if grouped {
        write!(f, "\\left({}\\right)", base.as_display())?;
    } else {
        base.fmt_latex(f)?;
    }
    write!(f, "^{{{}}}", exp.innermost().as_display())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parser::Parser;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    fn latex(source: &str) -> String {
        parse(source).as_display().to_string()
    }

    #[test]
    fn display_keeps_written_form() {
        assert_eq!(parse("3x + 6").to_string(), "3x + 6");
        assert_eq!(parse("x^(3(x + 6))^9").to_string(), "x^(3(x + 6))^9");
    }

    #[test]
    fn roots_and_powers() {
        assert_eq!(latex("sqrt(3x)^2"), "\\sqrt{3x}^{2}");
        assert_eq!(latex("(-x)^2"), "\\left(-x\\right)^{2}");
        assert_eq!(latex("cbrt(x)"), "\\sqrt[3]{x}");
    }

    #[test]
    fn fractions() {
        assert_eq!(
            latex("1/x + 5/x^2 - 6/(x - 1)"),
            "\\frac{1}{x} + \\frac{5}{x^{2}} - \\frac{6}{x - 1}",
        );
    }

    #[test]
    fn expansion_term() {
        assert_eq!(
            latex("(1)*(x - (pi))^2/2"),
            "\\frac{\\left(1\\right) \\cdot \\left(x - \\left(\\pi \\right)\\right)^{2}}{2}",
        );
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)^2"), "\\left(\\sin\\left(x\\right)\\right)^{2}");
        assert_eq!(latex("atan(y)"), "\\arctan\\left(y\\right)");
        assert_eq!(latex("exp(-x)"), "e^{-x}");
        assert_eq!(latex("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex("erf(x)"), "\\mathrm{ erf }\\left(x\\right)");
        assert_eq!(latex("log(x, 2)"), "\\log\\left(x, 2\\right)");
    }
}
