//! In-process cache store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use glob::Pattern;
use parking_lot::Mutex;

use super::store::{CacheError, CacheStore};

#[derive(Debug, Clone)]
struct Entry {
    payload: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }
}

/// Cache store held in process memory.
///
/// Expiry is lazy: entries past their deadline are dropped when read or
/// enumerated, the same observable behaviour the remote store gives us.
/// Used as the store double in handler tests and for running the server
/// without a cache backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Crea un store vacio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numero de entradas vivas.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.payload.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            payload: payload.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut entries = self.entries.lock();
        let mut removed = 0;
        for key in keys {
            if let Some(entry) = entries.remove(key)
                && !entry.is_expired()
            {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let pattern = Pattern::new(pattern).map_err(|e| CacheError::Pattern(e.to_string()))?;

        let mut entries = self.entries.lock();
        // Barrido unico: descarta expiradas y recolecta coincidencias.
        let mut removed = 0;
        entries.retain(|key, entry| {
            if entry.is_expired() {
                return false;
            }
            if pattern.matches(key) {
                removed += 1;
                return false;
            }
            true
        });
        Ok(removed)
    }
}
