// Password hashing - Argon2id with a random per-account salt

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use tracing::warn;

use crate::error::{Error, Result};

pub const SALT_LEN: usize = 16;

/// 16 fresh random bytes, base64 encoded the way PHC strings expect.
pub fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(salt.as_str().to_string())
}

/// Hash `password` with the given base64 salt, returning a PHC string.
pub fn hash_password(password: &str, salt: &str) -> Result<String> {
    let salt = SaltString::from_b64(salt).map_err(|e| Error::PasswordHash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, phc: &str) -> bool {
    let parsed = match PasswordHash::new(phc) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
