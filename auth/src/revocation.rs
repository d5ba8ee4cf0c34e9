use std::collections::HashMap;
use std::sync::RwLock;

use crate::jwt::Claims;

/// Process-local deny-list of token ids.
///
/// An entry lives until the token it names would have expired anyway;
/// expired entries are pruned whenever a new one is added.
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: RwLock<HashMap<String, i64>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny the token described by `claims` until its expiry.
    pub fn revoke(&self, claims: &Claims, now: i64) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        entries.retain(|_, exp| *exp >= now);
        if claims.exp >= now {
            entries.insert(claims.jti.clone(), claims.exp);
        }
    }

    pub fn is_revoked(&self, jti: &str, now: i64) -> bool {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        entries.get(jti).is_some_and(|exp| *exp >= now)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
