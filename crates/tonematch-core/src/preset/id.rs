use std::fmt;

use rand::Rng;

/// Random preset identifier: 16 bytes rendered as 32 uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresetId(String);

impl PresetId {
    /// Draw a fresh identifier from the thread-local RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Deterministic identifier, for reproducible output.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(hex::encode_upper(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_32_uppercase_hex_digits() {
        let id = PresetId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
            "{id}"
        );
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(PresetId::generate(), PresetId::generate());
    }

    #[test]
    fn test_from_bytes_is_stable() {
        let id = PresetId::from_bytes([0xAB; 16]);
        assert_eq!(id.to_string(), "AB".repeat(16));
    }
}
