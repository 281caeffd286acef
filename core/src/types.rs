//! Parameter map handed to the client by callers.
//!
//! # Design
//! Values are resolved into a closed set of variants before they enter the
//! map: plain text is used verbatim, anything else is carried as a JSON value.
//! Serialization of arbitrary caller types happens at insertion time, so a
//! value that cannot be serialized never reaches the encoder.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Sent as-is.
    Text(String),
    /// Sent as its JSON text.
    Json(Value),
}

impl ParamValue {
    /// The string placed in a query string or form body for this value.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::Json(value) => value.to_string(),
        }
    }

    fn into_json(self) -> Value {
        match self {
            ParamValue::Text(text) => Value::String(text),
            ParamValue::Json(value) => value,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        ParamValue::Text(text.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(text: String) -> Self {
        ParamValue::Text(text)
    }
}

impl From<&String> for ParamValue {
    fn from(text: &String) -> Self {
        ParamValue::Text(text.clone())
    }
}

/// JSON strings become [`ParamValue::Text`] so they are not quoted on the wire.
impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => ParamValue::Text(text),
            other => ParamValue::Json(other),
        }
    }
}

/// Key/value input for a query string, a form body or a JSON body.
///
/// Keys may repeat. Entry order does not matter to the form encoder, which
/// sorts by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Adds a text entry.
    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ParamValue::Text(value.into()));
        self
    }

    /// Adds a text entry when `value` is present and leaves the map untouched
    /// otherwise.
    pub fn text_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    /// Adds an entry holding the JSON form of `value`.
    ///
    /// A value that fails to serialize is dropped with a warning; the rest of
    /// the map is unaffected.
    pub fn json<T: Serialize + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => self.insert(key, value),
            Err(e) => warn!("dropping parameter {key}: {e}"),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// JSON object view of the map. On a repeated key the last value wins.
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone().into_json()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::ser::{Error, Serializer};
    use serde_json::json;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn json_string_becomes_text() {
        assert_eq!(ParamValue::from(json!("abc")), ParamValue::Text("abc".to_string()));
        assert_eq!(ParamValue::from(json!(5)), ParamValue::Json(json!(5)));
    }

    #[test]
    fn query_value_of_json_is_json_text() {
        assert_eq!(ParamValue::Json(json!([1, 2])).to_query_value(), "[1,2]");
        assert_eq!(ParamValue::Json(json!(true)).to_query_value(), "true");
        assert_eq!(ParamValue::Text("a b".to_string()).to_query_value(), "a b");
    }

    #[test]
    fn json_builder_stores_serialized_value() {
        let params = Params::new().json("limit", &10).json("name", "plain");
        let entries: Vec<_> = params.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("limit", &ParamValue::Json(json!(10))),
                ("name", &ParamValue::Text("plain".to_string())),
            ]
        );
    }

    #[test]
    fn unserializable_value_is_dropped() {
        let params = Params::new()
            .text("a", "1")
            .json("broken", &Unserializable)
            .text("b", "2");
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(key, _)| key != "broken"));
    }

    #[test]
    fn text_opt_skips_missing_value() {
        let params = Params::new()
            .text_opt("present", Some("yes"))
            .text_opt("absent", None::<String>);
        assert_eq!(params.len(), 1);
        assert_eq!(params.iter().next().unwrap().0, "present");
    }

    #[test]
    fn collects_from_map() {
        let params: Params = [("q", "London,uk"), ("appid", "abc123")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
    }

    #[test]
    fn json_object_keeps_last_duplicate() {
        let params = Params::new().text("k", "first").json("k", &2).text("s", "x");
        let object = params.to_json_object();
        assert_eq!(Value::Object(object), json!({"k": 2, "s": "x"}));
    }
}
