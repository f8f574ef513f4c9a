//! Dynamic value model
//!
//! Promises carry arbitrary runtime values: any value may be a fulfillment
//! result or a rejection reason. Heap variants are reference counted so
//! values can be handed to many reactions without deep copies.

use std::fmt;
use std::rc::Rc;

use serde_json::json;

use crate::error::PromiseError;
use crate::promise::Promise;
use crate::thenable::Thenable;

/// A runtime value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<[Value]>),
    /// `allSettled` record
    Settled(Rc<Settlement>),
    /// Error synthesized by the runtime (aggregate failure, chaining cycle)
    Error(Rc<PromiseError>),
    /// A native deferred value
    Promise(Promise),
    /// A foreign object exposing a `then` capability
    Thenable(Rc<dyn Thenable>),
}

/// Outcome of one input of `allSettled`
#[derive(Clone, Debug, PartialEq)]
pub enum Settlement {
    Fulfilled(Value),
    Rejected(Value),
}

impl Settlement {
    pub fn status(&self) -> &'static str {
        match self {
            Settlement::Fulfilled(_) => "fulfilled",
            Settlement::Rejected(_) => "rejected",
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Settlement::Fulfilled(value) => Some(value),
            Settlement::Rejected(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&Value> {
        match self {
            Settlement::Rejected(reason) => Some(reason),
            Settlement::Fulfilled(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Settlement::Fulfilled(value) => json!({ "status": "fulfilled", "value": value.to_json() }),
            Settlement::Rejected(reason) => json!({ "status": "rejected", "reason": reason.to_json() }),
        }
    }
}

impl Value {
    // ==================== Constructors ====================

    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::List(items.into_iter().collect())
    }

    /// Wrap a foreign thenable
    pub fn thenable<T: Thenable + 'static>(thenable: T) -> Self {
        Value::Thenable(Rc::new(thenable))
    }

    // ==================== Type checks ====================

    /// Whether resolving with this value goes through thenable adoption
    pub fn is_thenable(&self) -> bool {
        matches!(self, Value::Promise(_) | Value::Thenable(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Settled(_) => "settlement",
            Value::Error(_) => "error",
            Value::Promise(_) => "promise",
            Value::Thenable(_) => "thenable",
        }
    }

    // ==================== Accessors ====================

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(&**items),
            _ => None,
        }
    }

    pub fn as_settlement(&self) -> Option<&Settlement> {
        match self {
            Value::Settled(settlement) => Some(&**settlement),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&PromiseError> {
        match self {
            Value::Error(error) => Some(&**error),
            _ => None,
        }
    }

    pub fn as_promise(&self) -> Option<&Promise> {
        match self {
            Value::Promise(promise) => Some(promise),
            _ => None,
        }
    }

    /// JSON rendering used by the playground output
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(n) => json!(n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => json!(&**s),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Settled(settlement) => settlement.to_json(),
            Value::Error(error) => error.to_json(),
            Value::Promise(promise) => json!({
                "promise": promise.id().0,
                "state": promise.state().name(),
            }),
            Value::Thenable(_) => json!("[thenable]"),
        }
    }
}

// ==================== Conversions ====================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Rc::from(items))
    }
}

impl From<Settlement> for Value {
    fn from(settlement: Settlement) -> Self {
        Value::Settled(Rc::new(settlement))
    }
}

impl From<PromiseError> for Value {
    fn from(error: PromiseError) -> Self {
        Value::Error(Rc::new(error))
    }
}

impl From<Promise> for Value {
    fn from(promise: Promise) -> Self {
        Value::Promise(promise)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ==================== Equality and formatting ====================

/// Data variants compare structurally, promises and thenables by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Settled(a), Value::Settled(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Promise(a), Value::Promise(b)) => a.ptr_eq(b),
            (Value::Thenable(a), Value::Thenable(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Settled(settlement) => write!(f, "{settlement:?}"),
            Value::Error(error) => write!(f, "Error({error:?})"),
            Value::Promise(promise) => write!(f, "{promise:?}"),
            Value::Thenable(_) => write!(f, "Thenable"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Settled(settlement) => match &**settlement {
                Settlement::Fulfilled(value) => write!(f, "{{status: fulfilled, value: {value}}}"),
                Settlement::Rejected(reason) => write!(f, "{{status: rejected, reason: {reason}}}"),
            },
            Value::Error(error) => write!(f, "{error}"),
            Value::Promise(promise) => write!(f, "Promise {} <{}>", promise.id(), promise.state().name()),
            Value::Thenable(_) => write!(f, "[thenable]"),
        }
    }
}
