//! Session token and password digest primitives.
//!
//! Raw tokens are shown to the caller exactly once; only hex SHA-256 digests
//! are persisted, so a leaked database dump contains nothing replayable.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Prefix identifying trolley session tokens in logs and support tickets.
const SESSION_TOKEN_PREFIX: &str = "tr_";

const SECRET_BYTES: usize = 32;
const SALT_BYTES: usize = 16;

/// Generates a fresh opaque session token.
#[must_use]
pub fn generate_session_token() -> String {
    let mut secret = [0_u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut secret);

    format!("{SESSION_TOKEN_PREFIX}{}", URL_SAFE_NO_PAD.encode(secret))
}

/// Hex SHA-256 digest of a raw token, as stored in `sessions.token_digest`.
#[must_use]
pub fn digest_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Generates a random per-user password salt.
#[must_use]
pub fn generate_salt() -> String {
    let mut salt = [0_u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);

    URL_SAFE_NO_PAD.encode(salt)
}

/// Hex SHA-256 digest of a salted password.
#[must_use]
pub fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());

    format!("{:x}", hasher.finalize())
}

/// Verifies a password attempt against stored salt + digest.
#[must_use]
pub fn verify_password(salt: &str, digest: &str, attempt: &str) -> bool {
    // Compare digests byte-wise over fixed-length hex strings.
    let attempt_digest = digest_password(salt, attempt);

    attempt_digest.len() == digest.len()
        && attempt_digest
            .bytes()
            .zip(digest.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
