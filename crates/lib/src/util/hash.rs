//! Content hashing for configuration identity.
//!
//! A derivation's memoised results are keyed by the hash of the global
//! configuration they were computed from, so two contexts built from equal
//! configurations share cache entries and different ones never collide.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::OBJ_HASH_PREFIX_LEN;

pub type HashError = serde_json::Error;

/// A content-addressed hash identifying a unique object.
///
/// The hash is a 20-character truncated SHA-256 of the JSON-serialized struct.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string, e.g., `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let digest = hex::encode(Sha256::digest(serialized.as_bytes()));
    Ok(ObjectHash(digest[..OBJ_HASH_PREFIX_LEN].to_string()))
  }
}
