use logos::Logos;
use std::ops::Range;

/// The kinds of tokens in the function text. Whitespace separates tokens and is dropped.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    /// `^`, or `**` as written in many programming languages.
    #[token("^")]
    #[token("**")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(",")]
    Comma,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    /// A number with a decimal point or an exponent, such as `0.5`, `.5`, `3.` or `1e-3`.
    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    /// Any other character. No grammar rule accepts it.
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    /// Returns true if a token of this kind can begin an operand without a sign, which makes it
    /// an implicit multiplication when it directly follows another operand.
    pub fn starts_operand(self) -> bool {
        matches!(self, Self::Name | Self::Int | Self::Float | Self::OpenParen)
    }
}

/// A token, along with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    pub kind: TokenKind,

    /// The region of the source that the token covers.
    pub span: Range<usize>,

    /// The text of the token.
    pub lexeme: &'source str,
}
