use pbkdf2::password_hash::{PasswordHasher, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;

use crate::Error;

/// Hashes a plaintext password into a salted PBKDF2 PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[cfg(test)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    use pbkdf2::password_hash::{PasswordHash, PasswordVerifier};

    let hash = PasswordHash::new(hash)?;
    Ok(Pbkdf2.verify_password(password.as_bytes(), &hash).is_ok())
}
