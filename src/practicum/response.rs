//! Shape checks for the homework API response.
//!
//! The API is expected to answer with:
//!
//! ```json
//! {"homeworks": [{"homework_name": "...", "status": "approved", ...}], "current_date": 1700000000}
//! ```
//!
//! Everything is checked against a raw [`serde_json::Value`] so that each
//! deviation maps onto a precise [`HomeworkError::Schema`] instead of a
//! generic deserialization failure.

use serde_json::{Map, Value};

use super::HomeworkError;

/// Key holding the list of homeworks.
const HOMEWORKS_KEY: &str = "homeworks";

/// Key holding the server-side cursor.
const CURRENT_DATE_KEY: &str = "current_date";

/// A single homework entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    fields: Map<String, Value>,
}

impl HomeworkRecord {
    /// Wraps an already validated JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a string field, `None` if absent or not a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Returns true if the field exists at all.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// A response that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Homeworks updated since the requested cursor, most recent first.
    pub homeworks: Vec<HomeworkRecord>,

    /// Cursor to use for the next request.
    pub current_date: i64,
}

impl ApiResponse {
    /// The most recent submission, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}

/// Validates the decoded response body.
///
/// # Errors
///
/// Returns [`HomeworkError::Schema`] if the body is not an object, if either
/// `homeworks` or `current_date` is missing, if `homeworks` is not a list of
/// objects, or if `current_date` is not an integer.
pub fn validate_response(response: &Value) -> Result<ApiResponse, HomeworkError> {
    let Some(object) = response.as_object() else {
        return Err(HomeworkError::schema(format!(
            "expected a JSON object, got {}",
            json_type(response)
        )));
    };

    let homeworks = object
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| HomeworkError::schema(format!("missing key `{HOMEWORKS_KEY}`")))?;

    let current_date = object
        .get(CURRENT_DATE_KEY)
        .ok_or_else(|| HomeworkError::schema(format!("missing key `{CURRENT_DATE_KEY}`")))?;

    let Some(items) = homeworks.as_array() else {
        return Err(HomeworkError::schema(format!(
            "`{HOMEWORKS_KEY}` must be a list, got {}",
            json_type(homeworks)
        )));
    };

    let Some(current_date) = current_date.as_i64() else {
        return Err(HomeworkError::schema(format!(
            "`{CURRENT_DATE_KEY}` must be an integer, got {}",
            json_type(current_date)
        )));
    };

    let homeworks = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object().cloned().map(HomeworkRecord::new).ok_or_else(|| {
                HomeworkError::schema(format!(
                    "homework at index {index} must be an object, got {}",
                    json_type(item)
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
