//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the AST produced by [`taylor_parser`], with the main difference being that
//! [`SymExpr`] nodes **flatten** out the tree structure: `x + (y + z)` is a single
//! [`SymExpr::Add`] node with _three_ children.
//!
//! This makes it much easier to combine "like terms" (e.g. `x + x = 2x`), since all terms in
//! question are at the same level in the tree.
//!
//! Conversion from the AST is lossy: [`SymExpr`] does not store spans, and subtraction and
//! division are stored as addition and multiplication by `-1` and `^-1`.
//!
//! ```
//! use taylor_compute::symbolic::expr::SymExpr;
//! use taylor_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr: SymExpr = ast_expr.into();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical, expanded form by applying the rules in
//! [`simplify::rules`] until none of them apply. The rules cover combining like terms and factors,
//! distributing multiplication over addition, basic power rules, and folding of numbers.
//!
//! ```
//! use taylor_compute::symbolic::{expr::SymExpr, simplify};
//! use taylor_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("(x + 1)^2 - x");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&ast_expr.into());
//!
//! assert_eq!(simplified.to_string(), "x^2 + x + 1");
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] computes the symbolic derivative of an expression with respect to one
//! variable. The result is not simplified.

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
