//! Content digests via xxh3.

use xxhash_rust::xxh3::xxh3_128;

/// Digest a string into a fixed-width (32 char) lower-case hex identifier.
#[inline]
pub fn digest(input: &str) -> String {
    format!("{:032x}", xxh3_128(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_digest() {
        assert_eq!(digest("hello world"), digest("hello world"));
    }

    #[test]
    fn fixed_width_hex() {
        for input in ["", "a", "a much longer input string with spaces"] {
            let d = digest(input);
            assert_eq!(d.len(), 32);
            assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn different_input_different_digest() {
        assert_ne!(digest("hello"), digest("world"));
    }
}
