//! Typed key-value payloads for event `details` and `metadata`.
//!
//! `AttrValue` is a small tagged union instead of an untyped JSON blob so
//! that every value has exactly one canonical byte encoding when hashed.
//! Maps are `BTreeMap` throughout: key order is sorted, which makes the
//! encoding independent of insertion order and of the producing language's
//! dictionary semantics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered (key-sorted) string-keyed map of attribute values.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// One value in an event's `details` or `metadata` map.
///
/// Serde is `untagged`, so exports read as plain JSON
/// (`{"port": 443, "tls": true}`) while the in-memory representation stays
/// a closed union the canonical encoder can enumerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
    Map(AttrMap),
}

impl AttrValue {
    /// True when this value, or any value nested inside it, is a NaN or
    /// infinite float.
    ///
    /// JSON has no representation for non-finite numbers (`serde_json`
    /// writes them as `null`), so events reject such payloads at
    /// construction rather than producing an export that cannot be
    /// decoded.
    pub fn has_non_finite(&self) -> bool {
        match self {
            AttrValue::Float(f) => !f.is_finite(),
            AttrValue::List(items) => items.iter().any(Self::has_non_finite),
            AttrValue::Map(map) => map.values().any(Self::has_non_finite),
            AttrValue::Bool(_) | AttrValue::Int(_) | AttrValue::Str(_) => false,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}
