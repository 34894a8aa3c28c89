//! Flat header string parsing.
//!
//! Accepts `"Key1: Value1, Key2: Value2"` as found in command-line flags and
//! single-string configuration fields. Values cannot contain a literal comma.

use super::HeaderSet;

/// Parse a comma-separated list of `Key: Value` pairs.
///
/// Each pair is split on its first `:` only, so values such as
/// `Bearer abc:def` survive intact. Pairs without a colon or with an empty
/// key are dropped. A later duplicate key overwrites an earlier one.
/// Never fails; an empty input yields an empty set.
pub fn parse_headers_string(s: &str) -> HeaderSet {
    let mut headers = HeaderSet::new();

    for pair in s.split(',') {
        let Some((key, value)) = pair.trim().split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        headers.insert(key, value.trim());
    }

    headers
}
