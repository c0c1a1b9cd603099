//! Unary and binary operators.

use crate::{parser::{Associativity, Precedence}, tokenizer::TokenKind};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sign in front of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
    Pos,
}

impl UnaryOpKind {
    /// Returns the sign written by the given token, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sub => Some(Self::Neg),
            TokenKind::Add => Some(Self::Pos),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        Precedence::Neg
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

impl BinOpKind {
    /// Returns the operator written by the given token, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Exp => Some(Self::Exp),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Exp => Precedence::Exp,
        }
    }

    /// `2^3^4` is `2^(3^4)`; everything else groups to the left.
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True for the multiplication between juxtaposed operands, as in `2x` or `x y`.
    pub implicit: bool,

    /// The span of the operator token. An implicit operator covers the gap between its operands.
    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use serde::de::{value::{Error, StrDeserializer}, IntoDeserializer};
    use super::*;

    fn kind<'a, T: Deserialize<'a>>(name: &'a str) -> Result<T, Error> {
        let deserializer: StrDeserializer<'a, Error> = name.into_deserializer();
        T::deserialize(deserializer)
    }

    #[test]
    fn operator_kinds_by_name() {
        assert_eq!(kind::<BinOpKind>("Exp").unwrap(), BinOpKind::Exp);
        assert_eq!(kind::<UnaryOpKind>("Neg").unwrap(), UnaryOpKind::Neg);
        assert!(kind::<BinOpKind>("Mod").is_err());
    }
}
