//! Temporary password generation and one-way password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Length of every generated password.
pub const PASSWORD_LENGTH: usize = 10;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),
}

/// Freshly generated plaintext password. `Debug` output is redacted.
#[derive(Debug)]
pub struct TemporaryPassword(SecretString);

impl TemporaryPassword {
    /// Plaintext value, to be hashed or mailed and then dropped.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

fn random_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    match rng.random_range(0..3) {
        0 => char::from(b'0' + rng.random_range(0..10u8)),
        1 => char::from(b'A' + rng.random_range(0..26u8)),
        _ => char::from(b'a' + rng.random_range(0..26u8)),
    }
}

/// Generates a password from the thread-local CSPRNG.
///
/// Each character first picks one of digit, uppercase or lowercase with equal
/// probability, then a uniform member of that class.
pub fn generate_password() -> TemporaryPassword {
    generate_password_with(&mut rand::rng())
}

/// Same as [`generate_password`] with a caller supplied generator.
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R) -> TemporaryPassword {
    let password: String = (0..PASSWORD_LENGTH).map(|_| random_char(rng)).collect();
    TemporaryPassword(SecretString::from(password))
}

/// One-way password hashing with an embedded salt.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Argon2id hasher producing PHC strings.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Custom cost parameters: memory in KiB, iterations and parallelism.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, CredentialError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(hash).map_err(|_| CredentialError::MalformedHash)?;
        Ok(self
            .argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
