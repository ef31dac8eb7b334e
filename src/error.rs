//! Crate-wide error type.
//!
//! Every fallible operation returns [`Result`]. None of the variants carry
//! secret material, so errors can be logged or displayed freely.

use thiserror::Error;

/// Errors returned by the primitives in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The requested algorithm is unknown or compiled out.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    /// `update` or `finalize` was called on a terminal context.
    #[error("context already finalized")]
    ContextFinalized,

    /// A symmetric key had the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A nonce had the wrong length.
    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    /// An operation was called out of the required order.
    #[error("operation not allowed in the current phase")]
    PhaseError,

    /// Tag verification failed. No plaintext is released.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// An RSA component exceeds the configured bit width.
    #[error("key component of {bits} bits exceeds the {max_bits}-bit limit")]
    KeyTooLarge { bits: usize, max_bits: usize },

    /// An RSA exponent is out of range (`e` must be odd, `1 < e < n`).
    #[error("invalid RSA exponent")]
    InvalidExponent,

    /// The RSA modulus is not an odd integer greater than 2.
    #[error("invalid RSA modulus")]
    InvalidModulus,

    /// The requested RSA key size cannot be generated.
    #[error("invalid RSA key size: {0} bits")]
    InvalidKeySize(usize),

    /// The input to an RSA transform is not smaller than the modulus.
    #[error("input out of range for the modulus")]
    InputOutOfRange,

    /// A private operation was requested on a public-only key.
    #[error("private exponent is not available")]
    MissingPrivateExponent,

    /// A PKCS#1 v1.5 signature did not verify.
    #[error("invalid signature")]
    InvalidSignature,

    /// A PKCS#1 v1.5 ciphertext did not decrypt to a well-formed block.
    /// Every cause maps to this one variant.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The message is longer than the primitive can process: past the
    /// ChaCha20 block counter, or past the room in an RSA encryption block.
    #[error("message too long")]
    MessageTooLong,

    /// A nonce sequence ran out of counter values.
    #[error("nonce sequence exhausted")]
    NonceExhausted,

    /// The operating system entropy source failed.
    #[error("operating system entropy unavailable (code {0})")]
    EntropyUnavailable(i32),

    /// A configuration was rejected before any output was produced.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
