//! Cache key construction.
//!
//! Keys have the form `<namespace>:<model selector>:<fingerprint>`, where the
//! fingerprint is the lowercase hex SHA-256 digest of the full input text. The
//! digest is stable across runs and processes. Distinct inputs that collide
//! would share a cache slot; that case is not handled.

use sha2::{Digest, Sha256};
use std::fmt;

/// Logical operation a cached value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Explain,
    Infer,
}

impl CacheNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheNamespace::Explain => "explain",
            CacheNamespace::Infer => "infer",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SHA-256 of `text`, hex encoded.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the key for an (operation, model, input) triple.
pub fn cache_key(namespace: CacheNamespace, model: &str, input: &str) -> String {
    format!("{}:{}:{}", namespace, model, fingerprint(input))
}
