use std::collections::HashMap;
use aws_smithy_types::{Document, Number};
use serde_json::{Map, Value};


pub trait ToDocument {
    fn to_document(&self) -> Document;
}

pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToDocument for Value {
    fn to_document(&self) -> Document {
        match self {
            Value::Null => Document::Null,
            Value::Bool(bool) => Document::Bool(*bool),
            Value::Number(number) => match number.as_f64() {
                Some(float) => Document::Number(Number::Float(float)),
                None => Document::Null,
            },
            Value::String(string) => Document::String(string.to_owned()),
            Value::Array(array) => Document::Array(array.iter().map(|item| item.to_document()).collect()),
            Value::Object(object) => Document::Object(
                object.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_document()))
                    .collect::<HashMap<String, Document>>()
            ),
        }
    }
}

impl ToValue for Document {
    fn to_value(&self) -> Value {
        match self {
            Document::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_value()))
                    .collect::<Map<String, Value>>()
            ),
            Document::Array(array) => Value::Array(array.iter().map(|item| item.to_value()).collect()),
            // NaN / infinity have no json form
            Document::Number(number) => serde_json::Number::from_f64(number.to_f64_lossy())
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Document::String(string) => Value::String(string.to_owned()),
            Document::Bool(bool) => Value::Bool(*bool),
            Document::Null => Value::Null,
        }
    }
}


pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub schema: Document
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, schema: Document) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            schema
        }
    }
}
