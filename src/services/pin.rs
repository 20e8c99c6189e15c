// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team PIN hashing and verification.
//!
//! New teams store `hex(HMAC-SHA256(salt, pin))` with a random per-team
//! salt. Documents written before salting hold a bare `hex(SHA-256(pin))`
//! and no salt; those still verify.

use crate::error::AppError;
use crate::models::Team;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Generate a new random hex-encoded salt.
pub fn new_salt() -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate PIN salt")))?;
    Ok(hex::encode(salt))
}

/// Salted PIN hash.
pub fn hash_pin(pin: &str, salt: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid HMAC key: {}", e)))?;
    mac.update(pin.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Unsalted SHA-256 hash used by older team documents.
pub fn legacy_hash_pin(pin: &str) -> String {
    use sha2::Digest;
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// Check a PIN against a stored team in constant time.
pub fn verify_pin(pin: &str, team: &Team) -> bool {
    let expected = match &team.pin_salt {
        Some(salt) => match hash_pin(pin, salt) {
            Ok(hash) => hash,
            Err(_) => return false,
        },
        None => legacy_hash_pin(pin),
    };
    expected.as_bytes().ct_eq(team.pin_hash.as_bytes()).into()
}

/// Compare a presented secret with the configured one in constant time.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
