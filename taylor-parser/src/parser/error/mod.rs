pub mod kind;

pub use taylor_error::Error;
