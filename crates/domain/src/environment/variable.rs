//! Environment type

use serde::{Deserialize, Serialize};

use crate::request::Parameter;

/// A named set of variables used to fill `{{placeholders}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name
    pub name: String,
    /// Variables, in declaration order
    #[serde(default)]
    pub variables: Vec<Parameter>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Adds a variable.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push(Parameter::new(key, value));
        self
    }

    /// Returns the value of an enabled variable.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.enabled && v.key == key)
            .map(|v| v.value.as_str())
    }
}
