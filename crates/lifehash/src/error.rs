//! Error types for lifehash.

use lifehash_automata::Underflow;
use thiserror::Error;

/// Errors returned by LifeHash generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeHashError {
    /// The digest was not exactly 32 bytes.
    #[error("digest must be 32 bytes, got {len}")]
    InvalidDigestLength {
        /// Length that was provided.
        len: usize,
    },

    /// Module size was zero, or too large for the image dimensions.
    #[error("invalid module size: {0}")]
    InvalidModuleSize(u32),

    /// Color selection ran out of digest bits.
    ///
    /// Every version's draws fit in 256 bits, so this indicates a bug.
    #[error("entropy exhausted: {0}")]
    BitstreamUnderflow(#[from] Underflow),
}
