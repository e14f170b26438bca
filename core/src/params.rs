//! Query parameters and their wire encoding.
//!
//! # Design
//! `QueryParams` is an insertion-ordered list with unique keys. Order has no
//! meaning to the upstream API but makes the composed URL deterministic, so
//! tests and logs can compare URLs as strings.
//!
//! Values are stored raw. `encode` trims each value and percent-encodes it
//! exactly once; callers must not pre-encode free text.

use chrono::{DateTime, Local};
use url::form_urlencoded;

pub const CALL_SYSTEM_NAME: &str = "callSystemName";
pub const CALL_ID: &str = "callID";

/// Format of the per-request correlation token.
pub const CALL_ID_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Set `key` only if the caller has not already set it. Returns whether
    /// the default was applied.
    pub fn insert_default(&mut self, key: &str, value: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.pairs.push((key.to_string(), value.to_string()));
        true
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key=value` pairs joined by `&`, values trimmed and percent-encoded.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!("{}={}", encode_component(key), encode_component(value.trim()))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Correlation token for `callID`, derived from the given instant.
pub fn call_id_at(now: DateTime<Local>) -> String {
    now.format(CALL_ID_FORMAT).to_string()
}

/// Correlation token for `callID`, derived from the current local time.
pub fn new_call_id() -> String {
    call_id_at(Local::now())
}
