//! Prompt fingerprinting.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt template.
pub fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut hex, byte| {
            let _ = write!(hex, "{:02x}", byte);
            hex
        })
}

#[cfg(test)]
mod tests {
    use super::hash_prompt;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("classify this");
        let second = hash_prompt("classify this");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, hash_prompt("classify that"));
    }
}
