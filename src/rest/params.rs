//! Request parameters and their validation.
//!
//! Parameters travel as an insertion-ordered, string-keyed JSON mapping.
//! [`validate_params`] enforces that shape before a request is dispatched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::ValidationError;

/// An ordered mapping of request parameters.
///
/// # Example
///
/// ```rust
/// use safepay_api::rest::Params;
/// use serde_json::json;
///
/// let params = Params::new()
///     .with("token", "tok_abc")
///     .with("is_default", true);
///
/// assert_eq!(params.get("token"), Some(&json!("tok_abc")));
/// assert_eq!(
///     params.to_query(),
///     vec![
///         ("token".to_string(), "tok_abc".to_string()),
///         ("is_default".to_string(), "true".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the map for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Serializes a typed parameter struct into a `Params` map.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Serialization`] if serialization fails and
    /// [`ValidationError::NotAMapping`] if the value is not a JSON object.
    pub fn from_serializable<T: Serialize + ?Sized>(params: &T) -> Result<Self, ValidationError> {
        let value = serde_json::to_value(params).map_err(|e| ValidationError::Serialization {
            message: e.to_string(),
        })?;
        Self::try_from(value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Converts the parameters into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Flattens the parameters into query-string pairs.
    ///
    /// - `null` values are skipped
    /// - strings, numbers and booleans are stringified
    /// - arrays of scalars are joined with commas (empty arrays are skipped)
    /// - nested objects are sent as compact JSON
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.0.len());

        for (key, val) in &self.0 {
            match val {
                Value::Null => {}
                Value::String(s) => query.push((key.clone(), s.clone())),
                Value::Number(n) => query.push((key.clone(), n.to_string())),
                Value::Bool(b) => query.push((key.clone(), b.to_string())),
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.push((key.clone(), values.join(",")));
                    }
                }
                Value::Object(_) => query.push((key.clone(), val.to_string())),
            }
        }

        query
    }
}

impl TryFrom<Value> for Params {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::NotAMapping {
                found: json_type_name(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Validates raw request parameters.
///
/// `None` is accepted and yields `None`. Anything other than a JSON object
/// is rejected.
///
/// # Errors
///
/// Returns [`ValidationError::NotAMapping`] if `params` is present but not
/// a JSON object.
///
/// # Example
///
/// ```rust
/// use safepay_api::rest::{validate_params, ValidationError};
/// use serde_json::json;
///
/// assert!(validate_params(None).unwrap().is_none());
/// assert!(validate_params(Some(&json!({"amount": 100}))).is_ok());
/// assert_eq!(
///     validate_params(Some(&json!("amount=100"))),
///     Err(ValidationError::NotAMapping { found: "string" })
/// );
/// ```
pub fn validate_params(params: Option<&Value>) -> Result<Option<Params>, ValidationError> {
    params.cloned().map(Params::try_from).transpose()
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
