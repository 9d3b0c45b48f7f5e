//! Query-string decoding.
//!
//! Values are `application/x-www-form-urlencoded`-style: `%HH` is a byte, `+` is a space.
//! Decoding is best effort and never fails: a `%` that is not followed by two hex digits
//! is kept as-is.

use std::collections::HashMap;

/// Decodes a percent/plus-encoded string.
///
/// Bytes produced by `%HH` escapes that do not form valid UTF-8 are replaced with
/// `U+FFFD`. Use [`decode_bytes`] when the exact bytes matter.
pub fn decode(raw: &str) -> String {
    let bytes = decode_bytes(raw.as_bytes());
    match String::from_utf8(bytes) {
        Ok(decoded) => decoded,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Decodes a percent/plus-encoded byte sequence.
pub fn decode_bytes(raw: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        match raw[i] {
            b'%' => match (raw.get(i + 1).copied().and_then(hex_value), raw.get(i + 2).copied().and_then(hex_value)) {
                (Some(high), Some(low)) => {
                    decoded.push((high << 4) | low);
                    i += 3;
                }
                _ => {
                    decoded.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    decoded
}

/// Parses `key=value&key2=value2` into a map.
///
/// Only values are decoded. Pairs without `=` are ignored and a later duplicate key
/// overwrites an earlier one.
pub fn parse_query_string(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), decode(value)))
        .collect()
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
