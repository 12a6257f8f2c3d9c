use thiserror::Error;

/// Address family a parser or trie operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Address width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// Trie error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Address family mismatch: expected {expected}, got {input}")]
    AddressFamilyMismatch { expected: Family, input: String },

    #[error("Non-canonical mask: {0}")]
    NonCanonicalMask(String),

    #[error("Invalid prefix length for {family}: {len}")]
    InvalidPrefixLength { family: Family, len: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, TrieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_mismatch_is_matchable() {
        let err = TrieError::AddressFamilyMismatch {
            expected: Family::V6,
            input: "10.0.0.1".into(),
        };
        match &err {
            TrieError::AddressFamilyMismatch { expected, .. } => {
                assert_eq!(*expected, Family::V6);
            }
            _ => panic!("expected AddressFamilyMismatch"),
        }
    }

    #[test]
    fn test_prefix_length_display() {
        let err = TrieError::InvalidPrefixLength {
            family: Family::V4,
            len: "33".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("33"), "got: {}", display);
        assert!(display.contains("IPv4"), "got: {}", display);
    }

    #[test]
    fn test_family_display() {
        assert_eq!(Family::V4.to_string(), "IPv4");
        assert_eq!(Family::V6.to_string(), "IPv6");
        assert_eq!(Family::V6.bits(), 128);
    }
}
