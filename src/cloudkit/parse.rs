use chrono::DateTime;
use serde_json::{Map, Value, json};

use crate::cloudkit::error::StoreError;
use crate::cloudkit::kind::EntityKind;
use crate::cloudkit::record::{Record, RecordId, RecordValue};
use crate::cloudkit::remoteclient::FetchedRecord;

/// Convert a record into the CloudKit `fields` envelope, preserving order.
pub(crate) fn record_to_fields(record: &Record) -> Value {
    let mut fields = Map::new();
    for (name, value) in record.fields() {
        fields.insert(name.clone(), value_to_field(value));
    }
    Value::Object(fields)
}

/// Wrap a scalar in the CloudKit field value envelope.
fn value_to_field(value: &RecordValue) -> Value {
    match value {
        RecordValue::String(value) => json!({ "value": value }),
        RecordValue::Int(value) => json!({ "value": value }),
        RecordValue::Float(value) => json!({ "value": value }),
        RecordValue::Boolean(value) => json!({ "value": value }),
        RecordValue::Date(value) => {
            json!({ "value": value.timestamp_millis(), "type": "TIMESTAMP" })
        }
        RecordValue::Null => json!({ "value": null }),
    }
}

/// Parse a CloudKit `records/query` response into per-record results.
pub(crate) fn parse_query_response(json: &Value) -> Result<Vec<FetchedRecord>, StoreError> {
    let records = json
        .as_object()
        .and_then(|object| object.get("records"))
        .and_then(|records| records.as_array())
        .ok_or_else(invalid_response)?;

    let mut matches = Vec::with_capacity(records.len());
    for item in records {
        let entry = item.as_object().ok_or_else(invalid_response)?;
        let id = RecordId(
            entry
                .get("recordName")
                .and_then(|name| name.as_str())
                .ok_or_else(invalid_response)?
                .to_string(),
        );

        if let Some(code) = entry.get("serverErrorCode").and_then(|code| code.as_str()) {
            let reason = entry
                .get("reason")
                .and_then(|reason| reason.as_str())
                .unwrap_or("record failed to decode");
            matches.push(FetchedRecord {
                id,
                record: Err(StoreError(format!("{code}: {reason}"))),
            });
            continue;
        }

        matches.push(parse_record_entry(entry, id)?);
    }

    Ok(matches)
}

/// Parse one successful query entry into a record.
fn parse_record_entry(
    entry: &Map<String, Value>,
    id: RecordId,
) -> Result<FetchedRecord, StoreError> {
    let record_type = entry
        .get("recordType")
        .and_then(|name| name.as_str())
        .ok_or_else(invalid_response)?;

    let Some(kind) = EntityKind::from_record_type(record_type) else {
        return Ok(FetchedRecord {
            id,
            record: Err(StoreError(format!("unknown record type '{record_type}'"))),
        });
    };

    let fields = entry
        .get("fields")
        .and_then(|fields| fields.as_object())
        .ok_or_else(invalid_response)?;

    // Registry order, not JSON map order; absent fields are left out and
    // surface later as a mapping failure.
    let mut record = Record::new(kind);
    for name in kind.fields() {
        let Some(field) = fields.get(*name) else {
            continue;
        };
        match parse_field_value(field) {
            Some(value) => record.push(*name, value),
            None => log::warn!("skipping unsupported value for field '{name}' of {kind}"),
        }
    }

    Ok(FetchedRecord {
        id,
        record: Ok(record),
    })
}

/// Check a `records/modify` response for per-record failures.
pub(crate) fn parse_modify_response(json: &Value) -> Result<(), StoreError> {
    let records = json
        .as_object()
        .and_then(|object| object.get("records"))
        .and_then(|records| records.as_array())
        .ok_or_else(invalid_response)?;

    for item in records {
        if let Some(code) = item.get("serverErrorCode").and_then(|code| code.as_str()) {
            let reason = item
                .get("reason")
                .and_then(|reason| reason.as_str())
                .unwrap_or("save rejected");
            return Err(StoreError(format!("{code}: {reason}")));
        }
    }

    Ok(())
}

/// Convert a CloudKit field value envelope into a scalar.
fn parse_field_value(field: &Value) -> Option<RecordValue> {
    let object = field.as_object()?;
    let value = object.get("value")?;

    if let Some(type_name) = object.get("type").and_then(|name| name.as_str()) {
        if type_name == "TIMESTAMP" {
            let millis = value.as_i64()?;
            return DateTime::from_timestamp_millis(millis).map(RecordValue::Date);
        }
    }

    if value.is_null() {
        return Some(RecordValue::Null);
    }
    if let Some(int) = value.as_i64() {
        return Some(RecordValue::Int(int));
    }
    if let Some(unsigned) = value.as_u64() {
        return Some(RecordValue::Float(unsigned as f64));
    }
    if let Some(float) = value.as_f64() {
        return Some(RecordValue::Float(float));
    }
    if let Some(string) = value.as_str() {
        return Some(RecordValue::String(string.to_string()));
    }
    if let Some(boolean) = value.as_bool() {
        return Some(RecordValue::Boolean(boolean));
    }

    None
}

fn invalid_response() -> StoreError {
    StoreError("Invalid response from CloudKit".to_string())
}
