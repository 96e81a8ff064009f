//! Salted PBKDF2-HMAC-SHA256 credential hashing.
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.
//! The iteration count travels with the hash, so raising the work factor
//! later does not lock out existing accounts.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::CryptoError;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PBKDF2_ITERATIONS)
    }
}

impl PasswordHasher {
    /// Work factor for new hashes. Zero is bumped to one.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &str) -> String {
        let salt = generate_salt();
        let derived = derive(password, &salt, self.iterations);
        format!(
            "{SCHEME}${}${}${}",
            self.iterations,
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(derived.as_slice())
        )
    }

    /// Check `password` against an encoded hash in constant time.
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, CryptoError> {
        let parsed = ParsedHash::parse(encoded)?;
        let derived = derive(password, &parsed.salt, parsed.iterations);
        Ok(derived.as_slice().ct_eq(parsed.hash.as_slice()).into())
    }
}

struct ParsedHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl ParsedHash {
    fn parse(encoded: &str) -> Result<Self, CryptoError> {
        let mut parts = encoded.split('$');
        let scheme = parts.next().ok_or(CryptoError::MalformedHash)?;
        if scheme != SCHEME {
            return Err(CryptoError::UnsupportedScheme(scheme.to_string()));
        }
        let iterations: u32 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .ok_or(CryptoError::MalformedHash)?;
        let salt = decode_part(parts.next())?;
        let hash = decode_part(parts.next())?;
        if parts.next().is_some() || hash.len() != HASH_LENGTH || salt.is_empty() {
            return Err(CryptoError::MalformedHash);
        }
        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }
}

fn decode_part(part: Option<&str>) -> Result<Vec<u8>, CryptoError> {
    let part = part.ok_or(CryptoError::MalformedHash)?;
    STANDARD_NO_PAD
        .decode(part)
        .map_err(|_| CryptoError::MalformedHash)
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; HASH_LENGTH]> {
    let mut out = Zeroizing::new([0u8; HASH_LENGTH]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out[..]);
    out
}

/// Generate a cryptographically random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PasswordHasher {
        PasswordHasher::new(1_000)
    }

    #[test]
    fn hash_verifies_with_same_password() {
        let hasher = fast();
        let encoded = hasher.hash("correct horse");
        assert!(hasher.verify("correct horse", &encoded).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hasher = fast();
        let encoded = hasher.hash("correct horse");
        assert!(!hasher.verify("battery staple", &encoded).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let hasher = fast();
        assert_ne!(hasher.hash("password"), hasher.hash("password"));
    }

    #[test]
    fn hash_is_not_the_plain_password() {
        let encoded = fast().hash("secret123");
        assert!(!encoded.contains("secret123"));
        assert!(encoded.starts_with("pbkdf2-sha256$1000$"));
    }

    #[test]
    fn stored_iterations_win_over_current_setting() {
        let old = PasswordHasher::new(500).hash("password");
        assert!(PasswordHasher::new(2_000).verify("password", &old).unwrap());
    }

    #[test]
    fn malformed_hashes_rejected() {
        let hasher = fast();
        assert!(matches!(
            hasher.verify("x", "hashed_x_mock"),
            Err(CryptoError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            hasher.verify("x", "pbkdf2-sha256$0$AAAA$AAAA"),
            Err(CryptoError::MalformedHash)
        ));
        assert!(matches!(
            hasher.verify("x", "pbkdf2-sha256$10$!!$AAAA"),
            Err(CryptoError::MalformedHash)
        ));
        assert!(matches!(
            hasher.verify("x", "pbkdf2-sha256$10$AAAA"),
            Err(CryptoError::MalformedHash)
        ));
    }

    #[test]
    fn zero_iterations_bumped() {
        assert_eq!(PasswordHasher::new(0).iterations(), 1);
        assert_eq!(PasswordHasher::default().iterations(), PBKDF2_ITERATIONS);
    }

    #[test]
    fn generate_salt_is_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
