//! Random alias generation.
//!
//! Aliases are drawn from an alphabet without look-alike characters so a
//! short link can be read aloud or typed from print.

use rand::Rng;

/// Alphanumerics minus `0`, `O`, `1`, `l` and `I`.
pub const ALIAS_ALPHABET: &[u8] = b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Default length of a generated alias.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Produces fixed-length random aliases.
///
/// Uses the thread-local CSPRNG. Collisions are expected to be rare, not
/// impossible; the allocator retries on the store's duplicate-key signal.
#[derive(Debug, Clone, Copy)]
pub struct AliasGenerator {
    length: usize,
}

impl AliasGenerator {
    /// Creates a generator for aliases of `length` characters (at least 1).
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates one alias.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let alias = AliasGenerator::new(6).generate();
    /// assert_eq!(alias.len(), 6);
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| ALIAS_ALPHABET[rng.random_range(0..ALIAS_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_configured_length() {
        assert_eq!(AliasGenerator::default().generate().len(), 6);
        assert_eq!(AliasGenerator::new(10).generate().len(), 10);
    }

    #[test]
    fn test_zero_length_is_clamped() {
        let generator = AliasGenerator::new(0);
        assert_eq!(generator.length(), 1);
        assert_eq!(generator.generate().len(), 1);
    }

    #[test]
    fn test_generate_uses_unambiguous_alphabet() {
        let generator = AliasGenerator::default();
        for _ in 0..200 {
            let alias = generator.generate();
            assert!(alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b)));
            assert!(!alias.contains(&['0', 'O', '1', 'l', 'I'][..]));
        }
    }

    #[test]
    fn test_generate_produces_distinct_aliases() {
        let generator = AliasGenerator::default();
        let aliases: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 57^6 possibilities; a handful of collisions in 1000 draws would
        // point at a broken RNG.
        assert!(aliases.len() >= 995);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<&u8> = ALIAS_ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALIAS_ALPHABET.len());
        assert_eq!(ALIAS_ALPHABET.len(), 57);
    }
}
