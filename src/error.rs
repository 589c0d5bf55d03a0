use rand::rand_core;
use thiserror::Error;

/// Crate Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to instantiate an AES key with an input size that is not 128 or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16 or 32)")]
    InvalidKeyLength { len: usize },

    /// Provided a byte buffer that does not divide into whole 16-byte blocks.
    #[error("invalid buffer length: {len} bytes (must be a multiple of 16)")]
    InvalidBufferLength { len: usize },

    /// The CPU does not expose the AES instruction set.
    #[error("AES instructions not available on this CPU")]
    UnsupportedCpu,

    /// OS RNG failed during random key generation.
    #[error("OS RNG failed in random key generation")]
    Rng(#[from] rand_core::OsError),
}
