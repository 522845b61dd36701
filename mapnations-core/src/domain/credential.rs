//! Password credential models
//!
//! Passwords are stored as salted Argon2id hashes. Records written before
//! hashing existed hold the clear-text password as a bare JSON string; those
//! still verify and are upgraded by the credential service.

use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Default Argon2id parameters (OWASP minimums for interactive login)
pub const DEFAULT_TIME_COST: u32 = 2;
pub const DEFAULT_MEMORY_COST: u32 = 19456; // 19 MiB
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const DEFAULT_HASH_LEN: u32 = 32;

const SALT_LEN: usize = 16;
const ALGORITHM: &str = "argon2id";

/// Argon2id parameters for password hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argon2Params {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub parallelism: u32,
    pub hash_len: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            hash_len: DEFAULT_HASH_LEN,
        }
    }
}

impl Argon2Params {
    /// Smallest parameters argon2 accepts; only for tests
    pub fn insecure_fast() -> Self {
        Self {
            time_cost: 1,
            memory_cost: 8,
            parallelism: 1,
            hash_len: DEFAULT_HASH_LEN,
        }
    }
}

/// Hashed password record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHash {
    pub algorithm: String,
    /// Base64-encoded random salt
    pub salt: String,
    /// Hex-encoded derived hash
    pub hash: String,
    pub params: Argon2Params,
}

impl PasswordHash {
    /// Hash `password` under a fresh random salt
    pub fn create(password: &str, params: Argon2Params) -> Result<Self> {
        let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
        let hash = derive(password, &salt, &params)?;

        Ok(Self {
            algorithm: ALGORITHM.to_string(),
            salt: base64::engine::general_purpose::STANDARD.encode(salt),
            hash: hex::encode(hash),
            params,
        })
    }

    /// Check `password` against this record
    pub fn verify(&self, password: &str) -> Result<bool> {
        if self.algorithm != ALGORITHM {
            return Err(Error::Config(format!(
                "Unsupported password algorithm: {}",
                self.algorithm
            )));
        }

        let salt = base64::engine::general_purpose::STANDARD
            .decode(&self.salt)
            .map_err(|_| Error::storage("Invalid salt in stored credential"))?;
        let expected = hex::decode(&self.hash)
            .map_err(|_| Error::storage("Invalid hash in stored credential"))?;

        let actual = derive(password, &salt, &self.params)?;
        Ok(constant_time_eq(&actual, &expected))
    }
}

/// What the `password` field of a stored identity holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredSecret {
    Hashed(PasswordHash),
    /// Legacy clear-text password
    Plain(String),
}

impl StoredSecret {
    pub fn verify(&self, password: &str) -> Result<bool> {
        match self {
            StoredSecret::Hashed(hash) => hash.verify(password),
            StoredSecret::Plain(plain) => Ok(constant_time_eq(plain.as_bytes(), password.as_bytes())),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredSecret::Plain(_))
    }
}

/// Derive a password hash using Argon2id
fn derive(password: &str, salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let argon2_params = argon2::Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(params.hash_len as usize),
    )
    .map_err(|e| Error::Config(format!("Invalid argon2 params: {:?}", e)))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut out = vec![0u8; params.hash_len as usize];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| Error::storage(format!("Failed to hash password: {:?}", e)))?;

    Ok(out)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
