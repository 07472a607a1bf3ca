use lambda_runtime::tracing::{debug, warn};
use serde_json::{Map, Value};

use crate::models::{ChangeRecord, NormalizeError, TriggerEvent, TypeTag};

/// Decodes one change-stream record into its flattened form.
///
/// # Errors
///
/// Returns an error if the event name is not INSERT, MODIFY or REMOVE, or if
/// any image attribute carries an unsupported or malformed typed value.
pub fn decode_record(record: &Value) -> Result<ChangeRecord, NormalizeError> {
    let trigger_event: TriggerEvent = record
        .get("eventName")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .parse()?;

    let stream = record.get("dynamodb");
    let section = |name: &str| stream.and_then(|stream| stream.get(name));

    let table_name = record
        .get("eventSourceARN")
        .and_then(Value::as_str)
        .and_then(table_name_from_arn)
        .unwrap_or_else(|| {
            warn!("Change record has no table in its source ARN");
            String::new()
        });

    let change = ChangeRecord {
        trigger_event,
        stream_type: section("StreamViewType")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        table_name,
        keys: decode_image(section("Keys"))?,
        new_object: decode_image(section("NewImage"))?,
        old_object: decode_image(section("OldImage"))?,
    };

    debug!(
        table = %change.table_name,
        trigger = ?change.trigger_event,
        "Decoded change record"
    );
    Ok(change)
}

/// `arn:aws:dynamodb:region:account:table/<name>/stream/<label>` yields `<name>`.
#[must_use]
pub fn table_name_from_arn(arn: &str) -> Option<String> {
    arn.split('/').nth(1).map(ToString::to_string)
}

/// Flattens an image section; absent or empty sections yield `None`.
///
/// # Errors
///
/// Returns an error if any attribute fails to cast.
pub fn decode_image(image: Option<&Value>) -> Result<Option<Map<String, Value>>, NormalizeError> {
    match image.and_then(Value::as_object) {
        Some(attributes) if !attributes.is_empty() => attributes
            .iter()
            .map(|(name, wire)| Ok((name.clone(), cast_attribute(name, wire)?)))
            .collect::<Result<Map<_, _>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Casts a `{type_tag: raw_value}` pair to its native value.
///
/// # Errors
///
/// Returns `UnsupportedTypeTag` for tags outside the table and
/// `MalformedAttribute` when the pair itself is malformed.
pub fn cast_attribute(name: &str, wire: &Value) -> Result<Value, NormalizeError> {
    let malformed = |reason: &str| NormalizeError::MalformedAttribute {
        attribute: name.to_string(),
        reason: reason.to_string(),
    };

    let pair = wire
        .as_object()
        .ok_or_else(|| malformed("expected a {type: value} mapping"))?;
    let mut entries = pair.iter();
    let (Some((tag, raw)), None) = (entries.next(), entries.next()) else {
        return Err(malformed("expected exactly one type tag"));
    };

    let type_tag = TypeTag::from_tag(tag).ok_or_else(|| NormalizeError::UnsupportedTypeTag {
        attribute: name.to_string(),
        tag: tag.clone(),
    })?;
    type_tag.cast(name, raw)
}
