//! Error types for configuring and driving a hasher.

use std::fmt;

/// Error from the hashing facade.
///
/// All variants are fatal to the instance that produced them; no
/// operation is retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The function name is too long for its bit-length field.
    NameTooLong {
        /// Length of the rejected name in bytes.
        len: usize,
    },
    /// The customization string is too long for its bit-length field.
    CustomizationTooLong {
        /// Length of the rejected string in bytes.
        len: usize,
    },
    /// `absorb` was called after squeezing had started.
    AbsorbAfterSqueeze,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NameTooLong { len } => {
                write!(f, "function name of {len} bytes cannot be length-encoded")
            }
            Error::CustomizationTooLong { len } => {
                write!(
                    f,
                    "customization string of {len} bytes cannot be length-encoded"
                )
            }
            Error::AbsorbAfterSqueeze => {
                write!(f, "cannot absorb input after squeezing has started")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_the_cause() {
        let msg = Error::NameTooLong { len: 7 }.to_string();
        assert!(msg.contains("7 bytes"));
        let msg = Error::AbsorbAfterSqueeze.to_string();
        assert!(msg.contains("squeezing"));
    }
}
