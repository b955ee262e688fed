//! Key layout and encoding for the Fjall partitions
//!
//! Partition structure:
//! - `snippets`: snip:{id} -> Snippet (JSON)
//! - `latest`: {created_at_micros:020}:{id} -> id (unrestricted snippets only)
//!
//! The `latest` keys sort lexicographically in creation order, with the
//! UUIDv7 id as the tiebreak for identical timestamps, so a range scan of
//! the partition replaces an equality-filter index over the restriction
//! flags. Only unrestricted snippets are indexed, and those are never
//! mutated or evicted, so the index needs no maintenance after insert.

use chrono::{DateTime, Utc};

/// Encode a snippet key: snip:{id}
pub fn snippet_key(id: &str) -> Vec<u8> {
    format!("snip:{}", id).into_bytes()
}

/// Encode a latest-index key: {created_at_micros:020}:{id}
pub fn latest_key(created_at: DateTime<Utc>, id: &str) -> Vec<u8> {
    format!("{:020}:{}", created_at.timestamp_micros(), id).into_bytes()
}

/// Decode a latest-index key -> (created_at_micros, id)
pub fn decode_latest_key(key: &[u8]) -> Option<(i64, String)> {
    let key_str = std::str::from_utf8(key).ok()?;
    let (micros, id) = key_str.split_once(':')?;
    if id.is_empty() {
        return None;
    }
    Some((micros.parse().ok()?, id.to_string()))
}
