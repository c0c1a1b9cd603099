//! Constants that can be used by name in the function text. Each static returns a [`Float`] with
//! the given value.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// The golden ratio.
pub static PHI: Lazy<Float> = Lazy::new(|| (float(1) + float(5).sqrt()) / float(2));

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

pub static TAU: Lazy<Float> = Lazy::new(|| float(2) * &*PI);

/// The names of all constants, which cannot be used as variables.
pub const NAMES: [&str; 4] = ["e", "phi", "pi", "tau"];

/// Returns the value of the constant with the given name.
pub fn get(name: &str) -> Option<&'static Float> {
    match name {
        "e" => Some(&*E),
        "phi" => Some(&*PHI),
        "pi" => Some(&*PI),
        "tau" => Some(&*TAU),
        _ => None,
    }
}
