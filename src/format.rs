//! Key-case conversion for parameter mappings and Chilean RUT formatting.

use serde_json::{Map, Value};

use crate::parsers::format_amount;

/// `"messageId"` becomes `"message_id"`. Every upper-case letter after the
/// first character starts a new word.
#[must_use]
pub fn camel_to_snake(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    for (index, c) in camel.chars().enumerate() {
        if index > 0 && c.is_uppercase() {
            snake.push('_');
        }
        snake.extend(c.to_lowercase());
    }
    snake
}

/// `"message_id"` becomes `"messageId"`.
#[must_use]
pub fn snake_to_camel(snake: &str) -> String {
    let mut words = snake.split('_');
    let first = words.next().unwrap_or_default().to_lowercase();
    words.fold(first, |mut camel, word| {
        camel.push_str(&title(word));
        camel
    })
}

/// `"message_id"` becomes `"MessageId"`.
#[must_use]
pub fn snake_to_pascal(snake: &str) -> String {
    snake.split('_').map(title).collect()
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Rewrites every mapping key in `value`, descending into nested mappings and sequences.
#[must_use]
pub fn convert_keys(value: &Value, convert: &impl Fn(&str) -> String) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, nested)| (convert(key), convert_keys(nested, convert)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| convert_keys(item, convert)).collect())
        }
        other => other.clone(),
    }
}

/// Formats a RUT as `12.345.678-9`.
///
/// Without `dv` the last character of `rut` is the check digit. Returns an
/// empty string when the number part is not numeric.
#[must_use]
pub fn format_rut(rut: &str, dv: Option<&str>) -> String {
    let rut = rut.replace('-', "");
    let (number, check) = match dv {
        Some(dv) => (rut.as_str(), dv.to_string()),
        None => {
            let mut chars = rut.chars();
            let Some(check) = chars.next_back() else {
                return String::new();
            };
            (chars.as_str(), check.to_string())
        }
    };

    number
        .trim()
        .parse::<i64>()
        .map(|number| format!("{}-{check}", format_amount(number)))
        .unwrap_or_default()
}
