pub mod ast;
pub mod error;
pub mod fmt;
pub mod iter;
pub mod op;

use ast::{Binary, Call, Expr, LitFloat, LitInt, LitSym, Literal, Paren, Unary};
use error::{kind, Error};
use op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
use crate::tokenizer::{tokenize, Token, TokenKind};
use std::ops::Range;

/// How tightly an operator binds its operands, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Accepts every operator.
    Any,

    /// `+` and `-`, which separate terms.
    Term,

    /// `*`, `/` and implicit multiplication, which separate factors.
    Factor,

    /// A leading sign. It binds tighter than the factors around it, but looser than a power, so
    /// `-x^2` is `-(x^2)`.
    Neg,

    /// `^`.
    Exp,
}

impl Precedence {
    /// Returns the next tighter precedence.
    pub fn tighter(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

/// How a chain of operators with the same precedence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is `(a op b) op c`.
    Left,

    /// `a op b op c` is `a op (b op c)`.
    Right,
}

/// Anything that can be parsed from the function text.
pub trait Parse: Sized {
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// A precedence-climbing parser over the tokens of a piece of text.
///
/// Parsing never backtracks: the first token that does not fit the grammar is reported.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Vec<Token<'source>>,

    /// The index of the next token to consume.
    cursor: usize,

    /// The offset just past the last token.
    end: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        let tokens = tokenize(source);
        let end = tokens.last().map_or(0, |token| token.span.end);
        Self { tokens, cursor: 0, end }
    }

    /// Parses a value that must cover all of the text.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => Err(Error::new(
                vec![token.span.clone()],
                kind::UnclosedParenthesis { opening: false },
            )),
            Some(token) => Err(Error::new(vec![token.span.start..self.end], kind::ExpectedEof)),
        }
    }

    fn peek(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Consumes the next token.
    fn bump(&mut self) -> Option<Token<'source>> {
        let token = self.tokens.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(token)
    }

    /// Consumes the next token if it is of the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.peek_kind() == Some(kind) {
            self.bump()
        } else {
            None
        }
    }

    fn eof(&self) -> Error {
        Error::new(vec![self.end..self.end], kind::UnexpectedEof)
    }

    /// Parses an expression whose operators bind at least as tightly as `min`.
    pub fn parse_expr(&mut self, min: Precedence) -> Result<Expr, Error> {
        let lhs = self.parse_prefix()?;
        self.parse_infix(lhs, min)
    }

    /// Parses an operand, with any number of leading signs.
    fn parse_prefix(&mut self) -> Result<Expr, Error> {
        let Some(kind) = self.peek().and_then(|token| UnaryOpKind::from_token(token.kind)) else {
            return self.parse_operand();
        };
        let Some(token) = self.bump() else {
            return Err(self.eof());
        };

        let op = UnaryOp { kind, span: token.span };
        let operand = self.parse_expr(op.precedence())?;
        Ok(Expr::Unary(Unary {
            span: op.span.start..operand.span().end,
            operand: Box::new(operand),
            op,
        }))
    }

    /// Extends `lhs` with the binary operations that follow it, as long as they bind at least as
    /// tightly as `min`.
    fn parse_infix(&mut self, mut lhs: Expr, min: Precedence) -> Result<Expr, Error> {
        while let Some(token) = self.peek() {
            let op = match BinOpKind::from_token(token.kind) {
                Some(kind) => BinOp { kind, implicit: false, span: token.span.clone() },
                None if token.kind.starts_operand() => BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..token.span.start,
                },
                None => break,
            };
            let precedence = op.precedence();
            if precedence < min {
                break;
            }

            let rhs = if op.implicit {
                // no sign here: `2x - 1` subtracts, and `2x^2` is `2(x^2)`
                let operand = self.parse_operand()?;
                self.parse_infix(operand, precedence.tighter())?
            } else {
                self.bump();
                match op.associativity() {
                    Associativity::Left => self.parse_expr(precedence.tighter())?,
                    Associativity::Right => self.parse_expr(precedence)?,
                }
            };

            lhs = Expr::Binary(Binary {
                span: lhs.span().start..rhs.span().end,
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Parses a number, a symbol, a call or a parenthesized expression.
    fn parse_operand(&mut self) -> Result<Expr, Error> {
        let token = self.bump().ok_or_else(|| self.eof())?;
        let span = token.span.clone();
        let literal = match token.kind {
            TokenKind::Int => Literal::Integer(LitInt { value: token.lexeme.to_owned(), span }),
            TokenKind::Float => Literal::Float(LitFloat { value: token.lexeme.to_owned(), span }),
            TokenKind::Name => {
                let name = LitSym { name: token.lexeme.to_owned(), span };
                if self.peek_kind() == Some(TokenKind::OpenParen) {
                    return self.parse_call(name).map(Expr::Call);
                }
                Literal::Symbol(name)
            },
            TokenKind::OpenParen => return self.parse_paren(span).map(Expr::Paren),
            _ => return Err(Error::new(vec![span], kind::ExpectedExpr {
                found: token.lexeme.to_owned(),
            })),
        };
        Ok(Expr::Literal(literal))
    }

    /// Parses the rest of a parenthesized expression, after the opening parenthesis.
    fn parse_paren(&mut self, open: Range<usize>) -> Result<Paren, Error> {
        if let Some(close) = self.eat(TokenKind::CloseParen) {
            return Err(Error::new(vec![open.start..close.span.end], kind::EmptyParenthesis));
        }

        let expr = self.parse_expr(Precedence::Any)?;
        let close = self.eat(TokenKind::CloseParen).ok_or_else(|| {
            Error::new(vec![open.clone()], kind::UnclosedParenthesis { opening: true })
        })?;

        Ok(Paren {
            expr: Box::new(expr),
            span: open.start..close.span.end,
        })
    }

    /// Parses the argument list of a call to the function `name`.
    fn parse_call(&mut self, name: LitSym) -> Result<Call, Error> {
        let open = self.bump().ok_or_else(|| self.eof())?.span;
        let unclosed = || Error::new(vec![open.clone()], kind::UnclosedParenthesis { opening: true });

        let mut args = Vec::new();
        let close = match self.eat(TokenKind::CloseParen) {
            Some(close) => close,
            None => loop {
                args.push(self.parse_expr(Precedence::Any)?);
                if self.eat(TokenKind::Comma).is_some() {
                    continue;
                }
                break self.eat(TokenKind::CloseParen).ok_or_else(unclosed)?;
            },
        };

        Ok(Call {
            span: name.span.start..close.span.end,
            paren_span: open.start..close.span.end,
            name,
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_full::<Expr>()
    }

    fn sym(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span })))
    }

    fn int(value: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span })))
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit: false, span }
    }

    #[test]
    fn literals() {
        assert_eq!(parse("16").unwrap(), *int("16", 0..2));
        assert_eq!(parse("3.14").unwrap(), Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
        assert_eq!(parse("  x \n").unwrap(), *sym("x", 2..3));
    }

    #[test]
    fn subtraction_groups_left() {
        assert_eq!(parse("x - y - z").unwrap(), Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 0..1),
                op: op(BinOpKind::Sub, 2..3),
                rhs: sym("y", 4..5),
                span: 0..5,
            })),
            op: op(BinOpKind::Sub, 6..7),
            rhs: sym("z", 8..9),
            span: 0..9,
        }));
    }

    #[test]
    fn power_groups_right() {
        assert_eq!(parse("2^3^4").unwrap(), Expr::Binary(Binary {
            lhs: int("2", 0..1),
            op: op(BinOpKind::Exp, 1..2),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: int("3", 2..3),
                op: op(BinOpKind::Exp, 3..4),
                rhs: int("4", 4..5),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn product_binds_tighter_than_sum() {
        assert_eq!(parse("1 + 2 * x").unwrap(), Expr::Binary(Binary {
            lhs: int("1", 0..1),
            op: op(BinOpKind::Add, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: int("2", 4..5),
                op: op(BinOpKind::Mul, 6..7),
                rhs: sym("x", 8..9),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn implicit_multiplication_keeps_power() {
        assert_eq!(parse("1 + 2x^2").unwrap(), Expr::Binary(Binary {
            lhs: int("1", 0..1),
            op: op(BinOpKind::Add, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: int("2", 4..5),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 5..5 },
                rhs: Box::new(Expr::Binary(Binary {
                    lhs: sym("x", 5..6),
                    op: op(BinOpKind::Exp, 6..7),
                    rhs: int("2", 7..8),
                    span: 5..8,
                })),
                span: 4..8,
            })),
            span: 0..8,
        }));
    }

    #[test]
    fn implicit_multiplication_with_paren() {
        assert_eq!(parse("3(x + 1)").unwrap(), Expr::Binary(Binary {
            lhs: int("3", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: sym("x", 2..3),
                    op: op(BinOpKind::Add, 4..5),
                    rhs: int("1", 6..7),
                    span: 2..7,
                })),
                span: 1..8,
            })),
            span: 0..8,
        }));
    }

    #[test]
    fn implicit_multiplication_groups_with_explicit() {
        // `2*3x` is `(2*3)x`, and `x/2y` is `(x/2)y`
        assert_eq!(parse("2*3x").unwrap().to_string(), "2*3*x");
        let Expr::Binary(binary) = parse("x/2y").unwrap() else {
            panic!("expected a product");
        };
        assert!(binary.op.implicit);
        assert_eq!(binary.lhs.to_string(), "x/2");
    }

    #[test]
    fn sign_binds_looser_than_power() {
        assert_eq!(parse("-x^2").unwrap(), Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: op(BinOpKind::Exp, 2..3),
                rhs: int("2", 3..4),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
        assert_eq!(parse("x^-2 - -y").unwrap().to_string(), "x^-2 - -y");
    }

    #[test]
    fn calls() {
        assert_eq!(parse("log(x, 2)").unwrap(), Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![*sym("x", 4..5), *int("2", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));

        let Expr::Call(call) = parse("f()").unwrap() else {
            panic!("expected a call");
        };
        assert!(call.args.is_empty());
        assert_eq!(call.outer_span(), [0..2, 2..3]);
    }

    #[test]
    fn double_star_power() {
        assert_eq!(parse("x**2").unwrap().to_string(), parse("x^2").unwrap().to_string());
    }

    #[test]
    fn unclosed_paren() {
        let err = parse("sin(x").unwrap_err();
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis {
            opening: true,
        }));
        assert_eq!(err.spans, vec![3..4]);

        let err = parse("(x + 1").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_close_paren() {
        let err = parse("x + 1)").unwrap_err();
        assert_eq!(err.downcast_kind::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis {
            opening: false,
        }));
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn unexpected_eof() {
        let err = parse("x +").unwrap_err();
        assert!(err.downcast_kind::<kind::UnexpectedEof>().is_some());
        assert_eq!(err.spans, vec![3..3]);

        let err = parse("   ").unwrap_err();
        assert!(err.downcast_kind::<kind::UnexpectedEof>().is_some());
    }

    #[test]
    fn trailing_garbage() {
        let err = parse("x $ 2").unwrap_err();
        assert!(err.downcast_kind::<kind::ExpectedEof>().is_some());
        assert_eq!(err.spans, vec![2..5]);
    }

    #[test]
    fn missing_operand() {
        let err = parse("2 * , x").unwrap_err();
        assert_eq!(err.downcast_kind::<kind::ExpectedExpr>(), Some(&kind::ExpectedExpr {
            found: ",".to_string(),
        }));
        assert_eq!(err.spans, vec![4..5]);

        let err = parse("f(x,)").unwrap_err();
        assert!(err.downcast_kind::<kind::ExpectedExpr>().is_some());
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse("2 * ()").unwrap_err();
        assert!(err.downcast_kind::<kind::EmptyParenthesis>().is_some());
        assert_eq!(err.spans, vec![4..6]);
    }
}
