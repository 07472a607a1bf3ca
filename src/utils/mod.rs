//! Utility functions shared across the decoders.
//!
//! Body decoding, loose truthiness checks on raw event fields, and the path
//! splitting used to resolve gateway routing metadata.

use serde_json::{Map, Value};

/// Returns whether a raw event field counts as present.
///
/// `null`, `false`, zero, and empty strings, arrays or objects are all absent.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

/// Decodes a JSON object from text, yielding `None` for anything that is not one.
#[must_use]
pub fn decode_json_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Object(fields)) => Some(fields),
        _ => None,
    }
}

/// Decodes a request body: JSON object first, URL-encoded form as fallback.
///
/// Form decoding only runs when the text is not JSON at all. Valid JSON that
/// is not an object (string, array, number) yields an empty mapping.
#[must_use]
pub fn decode_body(text: &str) -> Map<String, Value> {
    match serde_json::from_str(text) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => Map::new(),
        Err(_) => decode_form(text),
    }
}

/// Decodes `application/x-www-form-urlencoded` text.
///
/// Only the first value of a repeated key is kept. Pairs without `=` and
/// pairs with an empty value are dropped.
#[must_use]
pub fn decode_form(text: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    for pair in text.split('&') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        fields
            .entry(form_unescape(name))
            .or_insert_with(|| Value::String(form_unescape(value)));
    }
    fields
}

fn form_unescape(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            let bytes = urlencoding::decode_binary(spaced.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// Returns the part of `path` between the first and second occurrence of any token.
///
/// Tokens are tried in order at each position, leftmost match first. `None`
/// when no token occurs at all.
#[must_use]
pub fn path_suffix<'a>(path: &'a str, tokens: &[&str]) -> Option<&'a str> {
    let (_, after) = find_token(path, 0, tokens)?;
    let end = find_token(path, after, tokens).map_or(path.len(), |(start, _)| start);
    path.get(after..end)
}

fn find_token(haystack: &str, from: usize, tokens: &[&str]) -> Option<(usize, usize)> {
    (from..haystack.len()).find_map(|start| {
        let rest = haystack.get(start..)?;
        tokens
            .iter()
            .filter(|token| !token.is_empty())
            .find(|token| rest.starts_with(**token))
            .map(|token| (start, start + token.len()))
    })
}

/// Case-insensitive header match.
#[must_use]
pub fn header_matches(name: &str, blocked: &str) -> bool {
    name.eq_ignore_ascii_case(blocked)
}
