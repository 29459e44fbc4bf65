//! Canonical encoding and hashing: the interop contract.
//!
//! Every producer or verifier of this log — in any language — must build
//! byte-for-byte identical digest inputs, so the layout below is a strict
//! contract, not an implementation detail. All hashing is SHA-256 over
//! UTF-8 bytes; digests are lowercase 64-character hex.
//!
//! Event digest input (one UTF-8 string, `|`-separated labeled fields):
//!   id:<uuid>|type:<TYPE>|severity:<sev>|ts:<rfc3339>|actor:<esc>
//!   |resource:<esc>|action:<esc>|details:<attr-map encoding>
//!
//! Block digest input:
//!   block:<uuid>|number:<n>|ts:<rfc3339>|prev:<hex>|merkle:<hex>|events:<n>
//!
//! Timestamps are RFC 3339 UTC with exactly microsecond precision and a
//! `Z` suffix. Free-text positions are escaped (see `escape_into`).
//! `metadata` never appears in any digest input.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use evident_contracts::{AttrMap, AttrValue, EventType, Severity};

/// The sentinel `previous_hash` of the genesis block.
///
/// 64 hex zeros — a value that can never be the SHA-256 of real data,
/// making genesis detection unambiguous.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// SHA-256 of raw bytes as a lowercase 64-character hex string.
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Format a timestamp the way every digest input requires: RFC 3339 UTC,
/// microsecond precision, `Z` suffix.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Compute the digest of one event from its hashed field set.
///
/// Pure function of exactly {id, type, severity, timestamp, actor,
/// resource, action, details}. Callers hold the event's `metadata`
/// elsewhere; it must never reach this function.
#[allow(clippy::too_many_arguments)]
pub fn event_digest(
    id: &Uuid,
    event_type: EventType,
    severity: Severity,
    timestamp: &DateTime<Utc>,
    actor: &str,
    resource: &str,
    action: &str,
    details: &AttrMap,
) -> String {
    let mut input = String::with_capacity(256);
    input.push_str("id:");
    input.push_str(&id.to_string());
    input.push_str("|type:");
    input.push_str(event_type.as_str());
    input.push_str("|severity:");
    input.push_str(severity.as_str());
    input.push_str("|ts:");
    input.push_str(&canonical_timestamp(timestamp));
    input.push_str("|actor:");
    escape_into(actor, &mut input);
    input.push_str("|resource:");
    escape_into(resource, &mut input);
    input.push_str("|action:");
    escape_into(action, &mut input);
    input.push_str("|details:");
    encode_map(details, &mut input);
    sha256_hex(input.as_bytes())
}

/// Compute the digest of a block header.
///
/// Commits to the merkle_root summary, never to per-event content.
pub fn block_digest(
    id: &Uuid,
    block_number: u64,
    timestamp: &DateTime<Utc>,
    previous_hash: &str,
    merkle_root: &str,
    event_count: usize,
) -> String {
    let input = format!(
        "block:{}|number:{}|ts:{}|prev:{}|merkle:{}|events:{}",
        id,
        block_number,
        canonical_timestamp(timestamp),
        previous_hash,
        merkle_root,
        event_count,
    );
    sha256_hex(input.as_bytes())
}

// ── Attribute value encoding ──────────────────────────────────────────────────

/// Characters with structural meaning in the canonical layout. Each is
/// backslash-escaped wherever free text appears, so the encoding stays
/// injective no matter what callers put in strings or map keys.
const STRUCTURAL: [char; 9] = ['\\', '|', ',', '=', ':', '{', '}', '[', ']'];

fn escape_into(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        if STRUCTURAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Encode one value with a single-letter type tag:
/// `b:` bool, `i:` integer, `f:` float, `s:` string, `l:[…]` list,
/// `m:{…}` map. Floats use the shortest decimal form that round-trips,
/// and are always finite: event construction rejects NaN and infinity,
/// so they never reach this encoder.
fn encode_value(value: &AttrValue, out: &mut String) {
    match value {
        AttrValue::Bool(b) => {
            out.push_str("b:");
            out.push_str(if *b { "true" } else { "false" });
        }
        AttrValue::Int(i) => {
            out.push_str("i:");
            out.push_str(&i.to_string());
        }
        AttrValue::Float(f) => {
            out.push_str("f:");
            out.push_str(&f.to_string());
        }
        AttrValue::Str(s) => {
            out.push_str("s:");
            escape_into(s, out);
        }
        AttrValue::List(items) => {
            out.push_str("l:[");
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                encode_value(item, out);
            }
            out.push(']');
        }
        AttrValue::Map(map) => encode_map(map, out),
    }
}

/// Encode a map as `m:{k1=v1,k2=v2,…}`. Keys are escaped and arrive in
/// sorted order from the BTreeMap, so two maps with equal contents always
/// encode identically regardless of how they were built.
fn encode_map(map: &AttrMap, out: &mut String) {
    out.push_str("m:{");
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        escape_into(key, out);
        out.push('=');
        encode_value(value, out);
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &AttrValue) -> String {
        let mut out = String::new();
        encode_value(value, &mut out);
        out
    }

    #[test]
    fn genesis_hash_is_64_zeros() {
        assert_eq!(GENESIS_HASH.len(), 64);
        assert!(GENESIS_HASH.chars().all(|c| c == '0'));
    }

    #[test]
    fn sha256_hex_shape() {
        let digest = sha256_hex(b"abc");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!digest.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn scalar_encodings() {
        assert_eq!(encode(&AttrValue::Bool(true)), "b:true");
        assert_eq!(encode(&AttrValue::Bool(false)), "b:false");
        assert_eq!(encode(&AttrValue::Int(-42)), "i:-42");
        assert_eq!(encode(&AttrValue::Float(0.5)), "f:0.5");
        assert_eq!(encode(&AttrValue::from("plain")), "s:plain");
    }

    #[test]
    fn structural_characters_are_escaped() {
        assert_eq!(encode(&AttrValue::from("a|b=c")), r"s:a\|b\=c");
        assert_eq!(encode(&AttrValue::from(r"back\slash")), r"s:back\\slash");
    }

    #[test]
    fn map_encoding_is_sorted_and_nested() {
        let mut inner = AttrMap::new();
        inner.insert("y".to_string(), AttrValue::Int(2));
        inner.insert("x".to_string(), AttrValue::Int(1));

        let mut map = AttrMap::new();
        map.insert("b".to_string(), AttrValue::Map(inner));
        map.insert("a".to_string(), AttrValue::List(vec![
            AttrValue::Int(1),
            AttrValue::from("s"),
        ]));

        let mut out = String::new();
        encode_map(&map, &mut out);
        assert_eq!(out, "m:{a=l:[i:1,s:s],b=m:{x=i:1,y=i:2}}");
    }

    #[test]
    fn event_digest_is_deterministic_and_ignores_nothing_hashed() {
        let id = Uuid::new_v4();
        let ts = Utc::now();
        let mut details = AttrMap::new();
        details.insert("ip".to_string(), AttrValue::from("10.0.0.1"));

        let a = event_digest(
            &id,
            EventType::LoginFailed,
            Severity::Warning,
            &ts,
            "alice",
            "auth-service",
            "login attempt",
            &details,
        );
        let b = event_digest(
            &id,
            EventType::LoginFailed,
            Severity::Warning,
            &ts,
            "alice",
            "auth-service",
            "login attempt",
            &details,
        );
        assert_eq!(a, b, "identical fields must yield identical digests");

        // Changing any hashed field changes the digest.
        let c = event_digest(
            &id,
            EventType::LoginSuccess,
            Severity::Warning,
            &ts,
            "alice",
            "auth-service",
            "login attempt",
            &details,
        );
        assert_ne!(a, c);
    }

    #[test]
    fn block_digest_changes_with_merkle_root() {
        let id = Uuid::new_v4();
        let ts = Utc::now();
        let root_a = sha256_hex(b"a");
        let root_b = sha256_hex(b"b");

        let d1 = block_digest(&id, 3, &ts, GENESIS_HASH, &root_a, 5);
        let d2 = block_digest(&id, 3, &ts, GENESIS_HASH, &root_b, 5);
        assert_ne!(d1, d2);
    }

    #[test]
    fn canonical_timestamp_is_fixed_width_utc() {
        let ts = Utc::now();
        let formatted = canonical_timestamp(&ts);
        assert!(formatted.ends_with('Z'));
        // 2026-08-25T12:34:56.123456Z — 27 characters, always.
        assert_eq!(formatted.len(), 27);
    }
}
