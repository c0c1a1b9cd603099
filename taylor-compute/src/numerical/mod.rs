//! Partial numerical evaluation of [`SymExpr`](crate::symbolic::SymExpr)s.
//!
//! Evaluation replaces the variables bound in a [`Ctxt`](ctxt::Ctxt) by their values, and folds
//! every subexpression that becomes fully numeric. Variables that are not bound are left as
//! symbols, so the result of evaluating `a*x` with `x = 2` is `2a`.
//!
//! Exact numbers stay exact: integers and fractions are combined with rational arithmetic, and
//! only decimals, transcendental function values, and irrational powers produce floats.

pub mod ctxt;
pub mod error;
pub mod eval;

pub use ctxt::Ctxt;
pub use eval::eval;
