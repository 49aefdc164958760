//! One-way password hashing. Both functions are pure and CPU-heavy; call
//! them from a blocking task.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Salted Argon2id digest in PHC string form (salt and cost embedded).
pub fn hash_password(plaintext: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();
    Ok(digest)
}

/// True iff `plaintext` hashes to `digest` under the digest's own salt and
/// parameters. A malformed digest never verifies.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_digest() {
        let digest = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &digest));
    }

    #[test]
    fn rejects_other_plaintext() {
        let digest = hash_password("pw1").unwrap();
        assert!(!verify_password("pw2", &digest));
        assert!(!verify_password("", &digest));
    }

    #[test]
    fn digests_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn plaintext_stored_passwords_never_verify() {
        assert!(!verify_password("hunter2", "hunter2"));
    }
}
