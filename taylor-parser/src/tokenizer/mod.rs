//! Splits the function text into [`Token`]s with [`logos`].

mod token;

use logos::Logos;
pub use token::{Token, TokenKind};

/// Returns every token of the source, in order. Characters that begin no token are returned as
/// [`TokenKind::Unknown`], so that the parser can point at them.
pub fn tokenize(source: &str) -> Vec<Token> {
    TokenKind::lexer(source)
        .spanned()
        .map(|(kind, span)| Token {
            kind: kind.unwrap_or(TokenKind::Unknown),
            lexeme: &source[span.clone()],
            span,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn kinds_and_lexemes(source: &str) -> Vec<(TokenKind, &str)> {
        tokenize(source).into_iter().map(|token| (token.kind, token.lexeme)).collect()
    }

    #[test]
    fn whitespace_is_dropped() {
        assert_eq!(kinds_and_lexemes(" 1 +\t2\n"), vec![
            (TokenKind::Int, "1"),
            (TokenKind::Add, "+"),
            (TokenKind::Int, "2"),
        ]);
    }

    #[test]
    fn expansion_term() {
        use TokenKind::*;
        assert_eq!(kinds_and_lexemes("(0.5) * (x - (1))**2 / 2"), vec![
            (OpenParen, "("), (Float, "0.5"), (CloseParen, ")"),
            (Mul, "*"),
            (OpenParen, "("), (Name, "x"), (Sub, "-"), (OpenParen, "("), (Int, "1"), (CloseParen, ")"), (CloseParen, ")"),
            (Exp, "**"), (Int, "2"),
            (Div, "/"), (Int, "2"),
        ]);
    }

    #[test]
    fn numbers_and_names() {
        use TokenKind::*;
        assert_eq!(kinds_and_lexemes("2x_1 1e-3 .25 3. 2e"), vec![
            (Int, "2"), (Name, "x_1"),
            (Float, "1e-3"),
            (Float, ".25"),
            (Float, "3."),
            (Int, "2"), (Name, "e"),
        ]);
    }

    #[test]
    fn unknown_characters_keep_their_span() {
        let tokens = tokenize("x $ y");
        assert_eq!(tokens[1], Token { kind: TokenKind::Unknown, span: 2..3, lexeme: "$" });
    }
}
