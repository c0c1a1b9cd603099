//! Multivariate Taylor series expansion.
//!
//! Given a function, a list of variables and an expansion point for each of them, this crate
//! computes the Taylor expansion of the function to a given order and simplifies it into a closed
//! form. All symbolic work is delegated to an [`Engine`]; [`Cas`] is the engine built on the
//! `taylor-parser` and `taylor-compute` crates.
//!
//! - [`input`] parses the four text fields of the calculator form.
//! - [`expand`] holds the expansion pipeline.
//! - [`PipelineFailure`] is the error returned by every stage of the pipeline.
//!
//! ```
//! use taylor_series::{calculate, input::Inputs, ExpansionOptions};
//!
//! let inputs = Inputs {
//!     function: "x * y".to_string(),
//!     variables: "x, y".to_string(),
//!     expansions: "x=0; y=0".to_string(),
//!     order: 2,
//! };
//! let expansion = calculate(&inputs, &ExpansionOptions::default()).unwrap();
//! assert_eq!(expansion.to_string(), "x*y");
//! ```

pub mod engine;
pub mod error;
pub mod expand;
pub mod input;
pub mod options;

pub use engine::{Cas, Engine};
pub use error::{Field, PipelineFailure};
pub use expand::{
    calculate,
    calculate_component_taylor,
    calculate_taylor,
    calculate_taylor_with_steps,
    expand_taylor,
    ExpansionStep,
    TaylorExpansion,
};
pub use options::{Composition, ExpansionOptions};
