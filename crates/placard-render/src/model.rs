//! The data model handed to a render.
//!
//! A [`DataModel`] is the root hash of a render: a map from unique string keys
//! to values. Values enter the model through [`serde::Serialize`], so plain
//! strings and numbers become scalars and any serializable struct becomes a
//! record whose fields can be reached with dotted paths:
//!
//! ```rust
//! use placard_render::DataModel;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Product { url: String, name: String }
//!
//! let mut model = DataModel::new();
//! model.insert("user", "Big Joe").unwrap();
//! model
//!     .insert("latestProduct", &Product {
//!         url: "products/greenmouse.html".into(),
//!         name: "green mouse".into(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(model.len(), 2);
//! assert!(model.contains_key("latestProduct"));
//! ```
//!
//! A `null` value is indistinguishable from a missing one at render time.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Root hash of a render: unique string keys mapped to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataModel {
    root: Map<String, Value>,
}

/// Outcome of walking a dotted path through the model.
#[derive(Debug, PartialEq)]
pub(crate) enum Lookup<'a> {
    /// The path resolved to a non-null value.
    Found(&'a Value),
    /// Some key along the path is absent, or the value is null.
    Missing,
    /// A non-final segment evaluated to something that has no fields.
    NotAHash {
        prefix: String,
        kind: &'static str,
    },
}

impl DataModel {
    /// Creates an empty data model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a data model from any value that serializes to an object.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Model`] if serialization fails or the value is
    /// not an object (a struct or a map with string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, RenderError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(root)) => Ok(Self { root }),
            Ok(other) => Err(RenderError::Model {
                key: "<root>".into(),
                message: format!("expected a hash, got a {}", kind_name(&other)),
            }),
            Err(err) => Err(RenderError::Model {
                key: "<root>".into(),
                message: err.to_string(),
            }),
        }
    }

    /// Inserts a value under `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Model`] if the value cannot be serialized.
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, RenderError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|err| RenderError::Model {
            key: key.clone(),
            message: err.to_string(),
        })?;
        Ok(self.root.insert(key, value))
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, RenderError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Returns the top-level value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Iterates over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Walks `path` one key at a time, starting at the root hash.
    pub(crate) fn lookup(&self, path: &[String]) -> Lookup<'_> {
        let Some((first, rest)) = path.split_first() else {
            return Lookup::Missing;
        };
        let Some(mut current) = self.root.get(first) else {
            return Lookup::Missing;
        };

        for (depth, part) in rest.iter().enumerate() {
            current = match current {
                Value::Object(map) => match map.get(part) {
                    Some(value) => value,
                    None => return Lookup::Missing,
                },
                Value::Null => return Lookup::Missing,
                other => {
                    return Lookup::NotAHash {
                        prefix: path[..=depth].join("."),
                        kind: kind_name(other),
                    }
                }
            };
        }

        match current {
            Value::Null => Lookup::Missing,
            value => Lookup::Found(value),
        }
    }
}

impl From<Map<String, Value>> for DataModel {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

/// Names a value's type the way error messages refer to it.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "hash",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(String::from).collect()
    }

    #[derive(Serialize)]
    struct Product {
        url: String,
        name: String,
    }

    #[test]
    fn test_insert_scalar_and_record() {
        let mut model = DataModel::new();
        model.insert("user", "Big Joe").unwrap();
        model
            .insert(
                "latestProduct",
                &Product {
                    url: "products/greenmouse.html".into(),
                    name: "green mouse".into(),
                },
            )
            .unwrap();

        assert_eq!(model.get("user"), Some(&json!("Big Joe")));
        assert_eq!(
            model.lookup(&path("latestProduct.name")),
            Lookup::Found(&json!("green mouse"))
        );
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut model = DataModel::new();
        assert_eq!(model.insert("user", "first").unwrap(), None);
        let previous = model.insert("user", "second").unwrap();
        assert_eq!(previous, Some(json!("first")));
        assert_eq!(model.len(), 1);
        assert_eq!(model.get("user"), Some(&json!("second")));
    }

    #[test]
    fn test_insert_unserializable_value() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys cannot become JSON keys");

        let err = DataModel::new().insert("bad", &bad).unwrap_err();
        assert!(matches!(err, RenderError::Model { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_from_serialize_requires_object() {
        assert!(DataModel::from_serialize(&json!({"a": 1})).is_ok());
        let err = DataModel::from_serialize(&vec![1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("expected a hash, got a sequence"));
    }

    #[test]
    fn test_lookup_missing_and_null() {
        let model = DataModel::from_serialize(&json!({"a": {"b": null}, "n": null})).unwrap();
        assert_eq!(model.lookup(&path("missing")), Lookup::Missing);
        assert_eq!(model.lookup(&path("a.c")), Lookup::Missing);
        assert_eq!(model.lookup(&path("a.b")), Lookup::Missing);
        assert_eq!(model.lookup(&path("n")), Lookup::Missing);
        assert_eq!(model.lookup(&path("n.deeper")), Lookup::Missing);
        assert_eq!(model.lookup(&[]), Lookup::Missing);
    }

    #[test]
    fn test_lookup_through_scalar() {
        let model = DataModel::from_serialize(&json!({"user": "Big Joe"})).unwrap();
        assert_eq!(
            model.lookup(&path("user.name")),
            Lookup::NotAHash {
                prefix: "user".into(),
                kind: "string"
            }
        );
    }

    #[test]
    fn test_with_builder_and_keys() {
        let model = DataModel::new()
            .with("b", &2)
            .unwrap()
            .with("a", &1)
            .unwrap();
        let mut keys: Vec<_> = model.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["a", "b"]);
        assert!(!model.is_empty());
    }
}
