//! Password Hashing and Verification
//!
//! bcrypt with a work factor of 12, plus:
//! - Zeroization of cleartext password memory
//! - Constant-time hash comparison (bcrypt internal)
//! - A dummy-hash helper so the "no such user" path costs the same as a
//!   real verification (timing-attack mitigation)

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// bcrypt work factor used for all stored hashes
pub const HASH_COST: u32 = 12;

/// Fixed input for [`hash_dummy`]; the value itself is irrelevant
const DUMMY_INPUT: &str = "dummy_password_for_timing";

/// Process-wide count of bcrypt operations (hash, verify, dummy)
static BCRYPT_OPS: AtomicU64 = AtomicU64::new(0);

/// Number of bcrypt operations performed so far in this process
///
/// Lets callers assert that a code path really burned a hash without
/// measuring wall-clock time.
pub fn bcrypt_op_count() -> u64 {
    BCRYPT_OPS.load(Ordering::Relaxed)
}

// ============================================================================
// Error Types
// ============================================================================

/// Password handling errors
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Password is empty
    #[error("Password cannot be empty")]
    Empty,

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash has an invalid format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// Complexity rules (length, character classes) are the validator's job;
/// this type only guards against empty input and memory leakage.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw password, rejecting empty input
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        if raw.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with bcrypt at [`HASH_COST`]
    pub fn hash(&self) -> Result<HashedPassword, PasswordError> {
        self.hash_with_cost(HASH_COST)
    }

    /// Hash with an explicit cost (tests use `bcrypt::MIN_COST` to stay fast)
    pub fn hash_with_cost(&self, cost: u32) -> Result<HashedPassword, PasswordError> {
        BCRYPT_OPS.fetch_add(1, Ordering::Relaxed);
        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in its modular-crypt string format
///
/// The stored string embeds algorithm version, cost and salt, so
/// verification needs no extra parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored hash string (e.g., from the database)
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = s.into();
        if !hash.starts_with("$2") {
            return Err(PasswordError::InvalidHashFormat);
        }
        Ok(Self { hash })
    }

    /// Get the hash string for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// bcrypt compares digests in constant time internally.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        BCRYPT_OPS.fetch_add(1, Ordering::Relaxed);
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Timing equalization
// ============================================================================

/// Perform one hash-equivalent bcrypt operation on a dummy value
///
/// Called on the "user does not exist" login path so its response time is
/// indistinguishable from "user exists, wrong password".
pub fn hash_dummy() {
    hash_dummy_with_cost(HASH_COST);
}

/// Same as [`hash_dummy`] but with an explicit cost, for tests
pub fn hash_dummy_with_cost(cost: u32) {
    BCRYPT_OPS.fetch_add(1, Ordering::Relaxed);
    let _ = bcrypt::hash(DUMMY_INPUT, cost);
}

// ============================================================================
// Tests
// ============================================================================
