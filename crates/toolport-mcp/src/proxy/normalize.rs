//! Schema-driven argument defaulting and validation.

use serde_json::{Map, Value};
use thiserror::Error;
use toolport_core::{ObjectSchema, SchemaNode};

/// Arguments rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Every required key that was not supplied, in schema order.
    #[error("Missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),
}

/// Fill absent argument keys from the schema's declared defaults.
///
/// Only object schemas with a `properties` mapping take part; for anything
/// else `args` is returned unchanged. Non-object arguments are replaced by an
/// empty object before defaults are applied. Keys that are present, even with
/// an explicit `null`, are never overwritten.
pub fn apply_defaults(schema: &SchemaNode, args: Option<Value>) -> Option<Value> {
    let Some(properties) = schema.as_object().and_then(ObjectSchema::properties) else {
        return args;
    };

    let mut source = match args {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, property) in properties {
        if let Some(default) = &property.default {
            source
                .entry(key.clone())
                .or_insert_with(|| default.clone());
        }
    }

    Some(Value::Object(source))
}

/// Check that every required key is present.
///
/// Reports all missing keys at once, not just the first.
pub fn validate_required(schema: &SchemaNode, args: Option<&Value>) -> Result<(), ValidationError> {
    let Some(object) = schema.as_object() else {
        return Ok(());
    };
    let required = object.required();
    if required.is_empty() {
        return Ok(());
    }

    let Some(Value::Object(map)) = args else {
        return Err(ValidationError::MissingArguments(required.to_vec()));
    };

    let missing: Vec<String> = required
        .iter()
        .filter(|key| !map.contains_key(key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingArguments(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from(value)
    }

    #[test]
    fn test_defaults_fill_absent_keys() {
        let schema = schema(json!({
            "type": "object",
            "properties": { "foo": { "default": 42 }, "bar": {} },
            "required": ["foo"]
        }));

        let args = apply_defaults(&schema, Some(json!({ "bar": "baz" })));
        assert_eq!(args, Some(json!({ "foo": 42, "bar": "baz" })));
    }

    #[test]
    fn test_defaults_keep_explicit_null() {
        let schema = schema(json!({
            "type": "object",
            "properties": { "foo": { "default": 42 } }
        }));

        let args = apply_defaults(&schema, Some(json!({ "foo": null })));
        assert_eq!(args, Some(json!({ "foo": null })));
    }

    #[test]
    fn test_defaults_coerce_non_object_args() {
        let schema = schema(json!({
            "type": "object",
            "properties": { "limit": { "default": 10 } }
        }));

        assert_eq!(apply_defaults(&schema, None), Some(json!({ "limit": 10 })));
        assert_eq!(
            apply_defaults(&schema, Some(json!("react"))),
            Some(json!({ "limit": 10 }))
        );
    }

    #[test]
    fn test_defaults_skip_schemas_without_properties() {
        let no_props = schema(json!({ "type": "object", "required": ["value"] }));
        assert_eq!(apply_defaults(&no_props, None), None);

        let opaque = schema(json!({ "type": "string" }));
        assert_eq!(apply_defaults(&opaque, Some(json!("x"))), Some(json!("x")));

        assert_eq!(apply_defaults(&SchemaNode::Unset, None), None);
    }

    #[test]
    fn test_validate_lists_all_missing_in_schema_order() {
        let schema = schema(json!({
            "type": "object",
            "required": ["query", "limit", "offset"]
        }));

        let err = validate_required(&schema, Some(&json!({ "limit": 5 }))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingArguments(vec!["query".to_string(), "offset".to_string()])
        );
        assert_eq!(err.to_string(), "Missing required arguments: query, offset");
    }

    #[test]
    fn test_validate_non_object_args_lists_full_set() {
        let schema = schema(json!({ "type": "object", "required": ["a", "b"] }));

        let err = validate_required(&schema, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing required arguments: a, b");

        let err = validate_required(&schema, Some(&json!([1, 2]))).unwrap_err();
        assert_eq!(err.to_string(), "Missing required arguments: a, b");
    }

    #[test]
    fn test_validate_accepts_explicit_null() {
        let schema = schema(json!({ "type": "object", "required": ["value"] }));
        assert!(validate_required(&schema, Some(&json!({ "value": null }))).is_ok());
    }

    #[test]
    fn test_validate_noop_without_required() {
        let schema = schema(json!({ "type": "object", "properties": {} }));
        assert!(validate_required(&schema, None).is_ok());
        assert!(validate_required(&SchemaNode::Unset, None).is_ok());
    }
}
