use serde_json::Value;

use crate::domain::activity::CostCategory;
use crate::domain::flag::FlagReason;

/// Checked in this order; the first missing field is the one reported.
pub const REQUIRED_SUBMISSION_FIELDS: [&str; 5] =
    ["name", "location", "description", "price", "cost"];

const REQUIRED_FLAG_FIELDS: [&str; 3] = ["activityId", "activityName", "reason"];

/// Validates a raw submission body before anything touches the store.
///
/// Absent, null, and empty-string values all count as missing so that a
/// submission form posting `""` for an untouched input is rejected the same
/// way as one omitting the field.
pub fn validate_submission(body: &Value) -> Result<(), String> {
    if !body.is_object() {
        return Err("Request body must be a JSON object".to_string());
    }

    for field in REQUIRED_SUBMISSION_FIELDS {
        if is_missing(body.get(field)) {
            return Err(format!("Missing required field: {}", field));
        }
    }

    let cost = body.get("cost").and_then(Value::as_str).unwrap_or_default();
    if CostCategory::parse(cost).is_none() {
        return Err("Invalid value for field: cost".to_string());
    }

    match (body.get("lat"), body.get("lng")) {
        (None, None) => {}
        (Some(lat), Some(lng)) => {
            if !lat.is_number() {
                return Err("Invalid value for field: lat".to_string());
            }
            if !lng.is_number() {
                return Err("Invalid value for field: lng".to_string());
            }
        }
        _ => return Err("Fields lat and lng must be provided together".to_string()),
    }

    Ok(())
}

pub fn validate_flag(body: &Value) -> Result<(), String> {
    if !body.is_object() {
        return Err("Request body must be a JSON object".to_string());
    }

    for field in REQUIRED_FLAG_FIELDS {
        if is_missing(body.get(field)) {
            return Err(format!("Missing required field: {}", field));
        }
    }

    let reason = body.get("reason").and_then(Value::as_str).unwrap_or_default();
    if FlagReason::parse(reason).is_none() {
        return Err("Invalid reason provided".to_string());
    }

    Ok(())
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
