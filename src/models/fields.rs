use serde_json::{Map, Value};

use super::Choice;
use crate::error::FieldError;

/// Typed reads from a JSON object that record a violation instead of
/// stopping at the first bad field. `null` counts as absent.
pub(super) struct Fields<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub(super) fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            errors: Vec::new(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(super) fn string(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.reject(field, "Input should be a valid string");
                None
            }
        }
    }

    pub(super) fn required_string(&mut self, field: &str) -> Option<String> {
        if self.present(field).is_none() {
            self.reject(field, "Field required");
            return None;
        }
        self.string(field)
    }

    pub(super) fn boolean(&mut self, field: &str) -> Option<bool> {
        match self.present(field)? {
            Value::Bool(b) => Some(*b),
            _ => {
                self.reject(field, "Input should be a valid boolean");
                None
            }
        }
    }

    pub(super) fn integer(&mut self, field: &str) -> Option<i64> {
        match self.present(field)?.as_i64() {
            Some(n) => Some(n),
            None => {
                self.reject(field, "Input should be a valid integer");
                None
            }
        }
    }

    pub(super) fn choice<T: Choice>(&mut self, field: &str) -> Option<T> {
        let parsed = self.present(field)?.as_str().and_then(T::parse);
        if parsed.is_none() {
            self.reject(field, format!("Input should be one of {}", T::allowed()));
        }
        parsed
    }

    pub(super) fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
