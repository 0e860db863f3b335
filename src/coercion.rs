//! Turns fixture output into remote objects.
//!
//! A JSON object becomes a [`RemoteObject`]. When it has no `object` field but
//! a non-empty string `id`, the type tag is inferred from the id prefix
//! (`cus_123` is a `customer`). Anything else is passed through untouched.

use std::fmt;
use std::ops::Index;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::fixture::Params;

/// Tag used when an id prefix is not in the lookup table.
pub const UNKNOWN_OBJECT: &str = "unknown";

const PREFIXES: &[(&str, &str)] = &[
    ("acct", "account"),
    ("ba", "bank_account"),
    ("card", "card"),
    ("ch", "charge"),
    ("cs", "checkout.session"),
    ("cus", "customer"),
    ("evt", "event"),
    ("fca", "financial_connections.account"),
    ("fcsess", "financial_connections.session"),
    ("ii", "invoiceitem"),
    ("in", "invoice"),
    ("pi", "payment_intent"),
    ("pm", "payment_method"),
    ("po", "payout"),
    ("price", "price"),
    ("prod", "product"),
    ("re", "refund"),
    ("seti", "setup_intent"),
    ("si", "subscription_item"),
    ("src", "source"),
    ("sub", "subscription"),
    ("tok", "token"),
    ("tr", "transfer"),
    ("txn", "balance_transaction"),
];

/// Infer an object type from the part of `id` before the first `_`.
#[must_use]
pub fn infer_object_type(id: &str) -> &'static str {
    let prefix = id.split('_').next().unwrap_or_default();
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map_or(UNKNOWN_OBJECT, |&(_, tag)| tag)
}

/// A dynamically keyed record shaped like an API response object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteObject {
    fields: Params,
}

impl RemoteObject {
    /// Wrap `fields` as-is, without tag inference.
    #[must_use]
    pub fn new(fields: Params) -> Self {
        Self { fields }
    }

    /// Wrap `fields`, adding an inferred `object` tag when it is missing and
    /// `id` is a non-empty string.
    #[must_use]
    pub fn from_fields(mut fields: Params) -> Self {
        if !fields.contains_key("object") {
            let tag = match fields.get("id") {
                Some(Value::String(id)) if !id.is_empty() => Some(infer_object_type(id)),
                _ => None,
            };
            if let Some(tag) = tag {
                fields.insert("object".to_string(), Value::String(tag.to_string()));
            }
        }
        Self { fields }
    }

    /// A field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A string field by name.
    #[must_use]
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// The `id` field, if it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// The `object` type tag, if present.
    #[must_use]
    pub fn object_type(&self) -> Option<&str> {
        self.str_field("object")
    }

    /// A nested object field as a remote object.
    #[must_use]
    pub fn nested(&self, field: &str) -> Option<RemoteObject> {
        match self.fields.get(field) {
            Some(Value::Object(map)) => Some(Self::new(map.clone())),
            _ => None,
        }
    }

    /// True when `field` is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Borrow the underlying fields.
    #[must_use]
    pub fn fields(&self) -> &Params {
        &self.fields
    }

    /// Consume into the underlying fields.
    #[must_use]
    pub fn into_map(self) -> Params {
        self.fields
    }

    /// A JSON object copy of this record.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

static NULL: Value = Value::Null;

impl Index<&str> for RemoteObject {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }
}

impl Serialize for RemoteObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl fmt::Display for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.object_type(), self.id()) {
            (Some(kind), Some(id)) => write!(f, "{kind} {id}"),
            (None, Some(id)) => f.write_str(id),
            (Some(kind), None) => f.write_str(kind),
            (None, None) => f.write_str("<object>"),
        }
    }
}

/// What a resolved fake call returns.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeResponse {
    /// The fixture produced a JSON object.
    Object(RemoteObject),
    /// The fixture produced something else; returned unchanged.
    Raw(Value),
}

impl FakeResponse {
    /// The remote object, if this response is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&RemoteObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Raw(_) => None,
        }
    }

    /// Consume into the remote object, if this response is one.
    #[must_use]
    pub fn into_object(self) -> Option<RemoteObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Raw(_) => None,
        }
    }

    /// The response as plain JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Object(object) => object.to_value(),
            Self::Raw(value) => value.clone(),
        }
    }

    /// Shorthand for the object's `id`.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.as_object().and_then(RemoteObject::id)
    }

    /// Shorthand for the object's `object` tag.
    #[must_use]
    pub fn object_type(&self) -> Option<&str> {
        self.as_object().and_then(RemoteObject::object_type)
    }
}

impl Index<&str> for FakeResponse {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        match self {
            Self::Object(object) => &object[field],
            Self::Raw(value) => value.get(field).unwrap_or(&NULL),
        }
    }
}

impl Serialize for FakeResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(object) => object.serialize(serializer),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

/// Shape an evaluated fixture into a response.
#[must_use]
pub fn coerce(value: Value) -> FakeResponse {
    match value {
        Value::Object(fields) => FakeResponse::Object(RemoteObject::from_fields(fields)),
        other => FakeResponse::Raw(other),
    }
}
