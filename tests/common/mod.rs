//! Test helpers

#![allow(dead_code)]

use vow::{Promise, RunConfig, Runtime, Value};

pub fn runtime() -> Runtime {
    Runtime::new(RunConfig::default())
}

pub fn promises(items: impl IntoIterator<Item = Promise>) -> Vec<Value> {
    items.into_iter().map(Value::Promise).collect()
}

pub fn int_of(value: &Value) -> i64 {
    value.as_int().unwrap_or_default()
}
