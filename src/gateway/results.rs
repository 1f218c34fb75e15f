// src/gateway/results.rs

//! Ephemeral in-memory store of submission results.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::errors::{Result, RungraphError};
use crate::gateway::response::ResultSet;

/// Opaque random key handed out when a result is filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultKey(Uuid);

impl ResultKey {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ResultKey {
    type Err = RungraphError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| RungraphError::ResultNotFound(s.to_string()))
    }
}

/// Results keyed by [`ResultKey`]. Nothing is persisted.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: HashMap<ResultKey, ResultSet>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, results: ResultSet) -> ResultKey {
        let key = ResultKey::new_random();
        self.results.insert(key, results);
        key
    }

    /// Look up a filed result. Absent keys are `ResultNotFound`.
    pub fn get(&self, key: &ResultKey) -> Result<&ResultSet> {
        self.results
            .get(key)
            .ok_or_else(|| RungraphError::ResultNotFound(key.to_string()))
    }

    /// Parse `key` and look it up; malformed keys are also `ResultNotFound`.
    pub fn get_str(&self, key: &str) -> Result<&ResultSet> {
        let key: ResultKey = key.parse()?;
        self.get(&key)
    }

    pub fn remove(&mut self, key: &ResultKey) -> Option<ResultSet> {
        self.results.remove(key)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
