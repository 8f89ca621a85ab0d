//! Shape validation of raw review API responses.

use serde_json::Value;
use tracing::info;

use crate::base::types::PollError;

use super::report::Homework;

/// Check that `response` has the expected shape and extract its work items.
///
/// The API client returns the body untyped; everything downstream relies on
/// the checks here. An empty `homeworks` list is valid and means "nothing
/// new".
pub fn validate(response: &Value) -> Result<Vec<Homework>, PollError> {
    let object = response.as_object().ok_or_else(|| PollError::BadShape("response is not an object".to_string()))?;

    if !object.contains_key("homeworks") || !object.contains_key("current_date") {
        return Err(PollError::EmptyResponse);
    }

    let homeworks = object["homeworks"]
        .as_array()
        .ok_or_else(|| PollError::BadShape("`homeworks` is not an array".to_string()))?;

    let homeworks = homeworks
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(|err| PollError::BadShape(format!("bad work item: {}", err))))
        .collect::<Result<Vec<Homework>, _>>()?;

    info!("Review API response has the expected shape.");

    Ok(homeworks)
}

/// Extract the response's `current_date` watermark, if present and integral.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
