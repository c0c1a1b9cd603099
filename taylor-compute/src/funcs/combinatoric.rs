//! Counting functions.

use rug::Integer;

/// The factorial function, `n!`. This is used for the denominators of Taylor terms, so it is
/// always exact.
pub fn factorial(n: u32) -> Integer {
    Integer::from(Integer::factorial(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000_u64);
    }
}
