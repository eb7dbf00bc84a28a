//! API key generation and hashing

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Number of random bytes in a generated key
pub const API_KEY_BYTES: usize = 32;

/// Length of the hex-encoded plaintext key
pub const API_KEY_HEX_LEN: usize = API_KEY_BYTES * 2;

/// A freshly generated API key.
///
/// `plaintext` is handed to the operator once and must never be stored;
/// `hash` is what goes into `api_keys.key_hash`.
pub struct GeneratedApiKey {
    plaintext: String,
    hash: String,
}

impl GeneratedApiKey {
    /// Generate a key from the operating system CSPRNG
    pub fn generate() -> Self {
        let mut secret_bytes = [0u8; API_KEY_BYTES];
        OsRng.fill_bytes(&mut secret_bytes);
        Self::from_plaintext(hex::encode(secret_bytes))
    }

    /// Wrap an existing plaintext key
    pub fn from_plaintext(plaintext: impl Into<String>) -> Self {
        let plaintext = plaintext.into();
        let hash = hash_api_key(&plaintext);
        Self { plaintext, hash }
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Value for the `Authorization` header
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.plaintext)
    }
}

impl std::fmt::Debug for GeneratedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedApiKey")
            .field("plaintext", &"<redacted>")
            .field("hash", &self.hash)
            .finish()
    }
}

/// SHA-256 of the key, hex-encoded. Deterministic, so a presented key can be
/// matched against `api_keys.key_hash`.
pub fn hash_api_key(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}
