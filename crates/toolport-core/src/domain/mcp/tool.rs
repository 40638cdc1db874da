//! Tool descriptor and input schema types.
//!
//! Schemas arrive from tool servers as arbitrary JSON. They are parsed once
//! into [`SchemaNode`] so callers match on the shape instead of probing it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition reported by a tool server's listing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name, unique within one server's tool set.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Parsed input schema.
    #[serde(default)]
    pub input_schema: SchemaNode,
}

impl ToolDescriptor {
    /// Create a descriptor with no description and no schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: SchemaNode::Unset,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the input schema from raw JSON.
    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = SchemaNode::from(schema);
        self
    }
}

/// Input schema of a tool.
///
/// Only object schemas take part in defaulting and validation; anything else
/// is kept verbatim and treated as opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SchemaNode {
    /// No schema reported (missing or `null`).
    #[default]
    Unset,
    /// A schema with `"type": "object"`.
    Object(ObjectSchema),
    /// Any other schema.
    Other(Value),
}

impl SchemaNode {
    /// Returns `true` unless the schema is [`SchemaNode::Unset`].
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The object schema, if this is one.
    pub const fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(schema) => Some(schema),
            Self::Unset | Self::Other(_) => None,
        }
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        let is_object_schema = value.get("type").and_then(Value::as_str) == Some("object");
        match value {
            Value::Null => Self::Unset,
            raw if is_object_schema => Self::Object(ObjectSchema::from_json(raw)),
            other => Self::Other(other),
        }
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        match node {
            SchemaNode::Unset => Self::Null,
            SchemaNode::Object(schema) => schema.raw,
            SchemaNode::Other(raw) => raw,
        }
    }
}

/// Object schema with its declared properties and required keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    properties: Option<Vec<(String, PropertySchema)>>,
    required: Vec<String>,
    raw: Value,
}

impl ObjectSchema {
    fn from_json(raw: Value) -> Self {
        let properties = raw.get("properties").and_then(Value::as_object).map(|props| {
            props
                .iter()
                .map(|(name, prop)| (name.clone(), PropertySchema::from_json(prop)))
                .collect()
        });

        // Non-string entries can't name an argument key
        let required = raw
            .get("required")
            .and_then(Value::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            properties,
            required,
            raw,
        }
    }

    /// Declared properties, or `None` when the schema has no `properties` mapping.
    pub fn properties(&self) -> Option<&[(String, PropertySchema)]> {
        self.properties.as_deref()
    }

    /// Required keys, in schema order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// The schema exactly as the server reported it.
    pub const fn as_json(&self) -> &Value {
        &self.raw
    }
}

/// A single property of an object schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySchema {
    /// Literal default value. `Some(Value::Null)` is an explicit `null` default.
    pub default: Option<Value>,
}

impl PropertySchema {
    fn from_json(value: &Value) -> Self {
        Self {
            default: value.as_object().and_then(|obj| obj.get("default")).cloned(),
        }
    }
}

/// Options forwarded with a tool call.
///
/// `args` holds the tool arguments; every other field is passed through to the
/// runtime untouched (e.g. a `tailLog` flag).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,

    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CallOptions {
    /// Create empty call options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a JSON options bag into `args` and passthrough fields.
    pub fn from_bag(mut bag: Map<String, Value>) -> Self {
        let args = bag.remove("args");
        Self { args, extra: bag }
    }

    /// Set the arguments.
    #[must_use]
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    /// Add a passthrough field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Render the options back into a single JSON object.
    pub fn to_json(&self) -> Value {
        let mut bag = self.extra.clone();
        if let Some(args) = &self.args {
            bag.insert("args".to_string(), args.clone());
        }
        Value::Object(bag)
    }
}

/// Options for the tool listing operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsOptions {
    /// Whether the server should include input schemas.
    #[serde(default)]
    pub include_schema: bool,
}

impl ListToolsOptions {
    /// Listing options that request input schemas.
    pub const fn with_schema() -> Self {
        Self {
            include_schema: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_schema_parsing() {
        let node = SchemaNode::from(json!({
            "type": "object",
            "properties": {
                "foo": { "type": "number", "default": 42 },
                "bar": { "type": "string" },
                "baz": { "default": null }
            },
            "required": ["foo", 7, "bar"]
        }));

        let schema = node.as_object().unwrap();
        let props = schema.properties().unwrap();
        let foo = props.iter().find(|(name, _)| name == "foo").unwrap();
        let bar = props.iter().find(|(name, _)| name == "bar").unwrap();
        let baz = props.iter().find(|(name, _)| name == "baz").unwrap();

        assert_eq!(foo.1.default, Some(json!(42)));
        assert_eq!(bar.1.default, None);
        assert_eq!(baz.1.default, Some(Value::Null));
        assert_eq!(schema.required(), ["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_object_schema_without_properties() {
        let node = SchemaNode::from(json!({ "type": "object", "required": ["value"] }));
        let schema = node.as_object().unwrap();
        assert!(schema.properties().is_none());
        assert_eq!(schema.required(), ["value".to_string()]);
    }

    #[test]
    fn test_non_object_schemas() {
        assert_eq!(SchemaNode::from(Value::Null), SchemaNode::Unset);
        assert!(matches!(
            SchemaNode::from(json!({ "type": "string" })),
            SchemaNode::Other(_)
        ));
        assert!(matches!(SchemaNode::from(json!(true)), SchemaNode::Other(_)));
    }

    #[test]
    fn test_descriptor_deserialization() {
        let tool: ToolDescriptor = serde_json::from_value(json!({
            "name": "resolve-library-id",
            "inputSchema": { "type": "object", "required": ["libraryName"] }
        }))
        .unwrap();

        assert_eq!(tool.name, "resolve-library-id");
        assert_eq!(tool.description, "");
        assert!(tool.input_schema.as_object().is_some());

        let bare: ToolDescriptor = serde_json::from_value(json!({ "name": "ping" })).unwrap();
        assert_eq!(bare.input_schema, SchemaNode::Unset);
    }

    #[test]
    fn test_descriptor_serialization_keeps_raw_schema() {
        let schema = json!({ "type": "object", "properties": { "q": { "type": "string" } } });
        let tool = ToolDescriptor::new("search").with_input_schema(schema.clone());

        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["inputSchema"], schema);
    }

    #[test]
    fn test_call_options_flatten() {
        let options = CallOptions::new()
            .with_args(json!({ "foo": "bar" }))
            .with_field("tailLog", json!(true));

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, json!({ "args": { "foo": "bar" }, "tailLog": true }));
        assert_eq!(options.to_json(), json);
    }

    #[test]
    fn test_call_options_from_bag() {
        let bag = json!({ "args": null, "tailLog": true });
        let options = CallOptions::from_bag(bag.as_object().unwrap().clone());

        assert_eq!(options.args, Some(Value::Null));
        assert_eq!(options.extra.get("tailLog"), Some(&json!(true)));
    }
}
