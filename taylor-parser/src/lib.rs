//! Tokenizer and parser for mathematical expressions, such as `sin(x)*y + 2x^2`.
//!
//! The entry point is [`parser::Parser`]; parse a complete expression with
//! [`parser::Parser::try_parse_full`]:
//!
//! ```
//! use taylor_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("2x^2 + 1").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x^2 + 1");
//! ```

pub mod parser;
pub mod tokenizer;
