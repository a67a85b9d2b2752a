//! Postman environment files: exactly one environment, named like the file.

use chrono::{SecondsFormat, Utc};
use netconsole_application::{
    AdapterError, AdapterResult, EnvironmentAdapter, EnvironmentContainerAdapter, EnvironmentView,
};
use netconsole_domain::{DirtyFlag, Parameter, child_id, generate_id};
use serde_json::{Map, Value};

use super::FORMAT_ID;
use super::types::{PostmanEnvVariable, PostmanEnvironment};
use crate::formats::environment::{EnvironmentMut, EnvironmentNode, EnvironmentRef};
use crate::serialization::{from_value, to_json_stable, validate_json};

const VARIABLE_SCOPE: &str = "environment";

impl EnvironmentNode for PostmanEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn variables(&self) -> Vec<Parameter> {
        self.values
            .iter()
            .map(|variable| Parameter {
                key: variable.key.clone(),
                value: match &variable.value {
                    Value::String(text) => text.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                },
                description: None,
                enabled: variable.enabled,
            })
            .collect()
    }

    fn set_variables(&mut self, variables: &[Parameter]) {
        self.values = variables
            .iter()
            .map(|variable| PostmanEnvVariable {
                key: variable.key.clone(),
                value: Value::String(variable.value.clone()),
                enabled: variable.enabled,
                var_type: Some("default".to_string()),
                extra: Map::new(),
            })
            .collect();
    }
}

/// Adapter over a Postman environment file.
///
/// The file holds a single environment, identified as `<file id>/0`; adding
/// or removing environments is unsupported.
#[derive(Debug)]
pub struct PostmanEnvironmentContainer {
    id: String,
    environment_id: String,
    document: PostmanEnvironment,
    dirty: DirtyFlag,
    snapshot: String,
}

impl PostmanEnvironmentContainer {
    /// Creates an environment file named `name` with no variables.
    ///
    /// # Errors
    ///
    /// `Serialization` if the initial snapshot cannot be written.
    pub fn create(name: &str) -> AdapterResult<Self> {
        let document = PostmanEnvironment {
            id: Some(generate_id()),
            name: name.to_string(),
            values: Vec::new(),
            variable_scope: Some(VARIABLE_SCOPE.to_string()),
            exported_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            exported_using: Some(format!("netconsole/{}", env!("CARGO_PKG_VERSION"))),
            extra: Map::new(),
        };
        let snapshot = to_json_stable(&document)?;
        Ok(Self::wrap(generate_id(), document, snapshot))
    }

    /// Wraps `text`, which becomes the committed snapshot.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a Postman environment.
    pub fn parse(id: &str, text: &str) -> AdapterResult<Self> {
        let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

        let value = validate_json(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
        if !value.get("name").is_some_and(Value::is_string) {
            return Err(invalid("missing environment name".to_string()));
        }
        if !value.get("values").is_some_and(Value::is_array) {
            return Err(invalid("values must be an array".to_string()));
        }
        if let Some(scope) = value.get("_postman_variable_scope")
            && scope != VARIABLE_SCOPE
        {
            return Err(invalid(format!("variable scope {scope} is not an environment")));
        }
        let document: PostmanEnvironment =
            from_value(value).map_err(|e| invalid(format!("malformed values: {e}")))?;

        tracing::debug!(format = FORMAT_ID, id, "environment parsed");
        Ok(Self::wrap(id.to_string(), document, text.to_string()))
    }

    fn wrap(id: String, document: PostmanEnvironment, snapshot: String) -> Self {
        Self {
            environment_id: child_id(&id, 0),
            id,
            document,
            dirty: DirtyFlag::new(),
            snapshot,
        }
    }

    fn check_id(&self, id: &str) -> AdapterResult<()> {
        if id == self.environment_id {
            Ok(())
        } else {
            Err(AdapterError::NotFound(id.to_string()))
        }
    }
}

impl EnvironmentContainerAdapter for PostmanEnvironmentContainer {
    fn id(&self) -> &str {
        &self.id
    }

    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn name(&self) -> &str {
        &self.document.name
    }

    fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        self.document.set_name(name);
        self.dirty.mark();
        Ok(())
    }

    fn child_entry_ids(&self) -> Vec<String> {
        vec![self.environment_id.clone()]
    }

    fn environment(&self, id: &str) -> AdapterResult<Box<dyn EnvironmentView + '_>> {
        self.check_id(id)?;
        Ok(Box::new(EnvironmentRef::new(id, &self.document)))
    }

    fn environment_mut(&mut self, id: &str) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        self.check_id(id)?;
        Ok(Box::new(EnvironmentMut::new(
            id,
            &mut self.document,
            &self.dirty,
        )))
    }

    fn append_environment(
        &mut self,
        _name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        Err(AdapterError::unsupported(
            "Postman environment files hold exactly one environment",
        ))
    }

    fn delete_environment(&mut self, _id: &str) -> AdapterResult<()> {
        Err(AdapterError::unsupported(
            "Postman environment files hold exactly one environment",
        ))
    }

    fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    fn commit(&mut self) -> AdapterResult<()> {
        self.snapshot = to_json_stable(&self.document)?;
        self.dirty.clear();
        Ok(())
    }

    fn stringify(&self) -> AdapterResult<String> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "id": "5f0c",
        "name": "Staging",
        "values": [
            {"key": "base", "value": "https://staging", "enabled": true},
            {"key": "retries", "value": 3, "enabled": false}
        ],
        "_postman_variable_scope": "environment",
        "_postman_exported_at": "2024-01-01T00:00:00.000Z",
        "_postman_exported_using": "Postman/10.0"
    }"#;

    #[test]
    fn test_single_environment_named_like_the_file() {
        let file = PostmanEnvironmentContainer::parse("e", SAMPLE).unwrap();
        assert_eq!(file.child_entry_ids(), vec!["e/0"]);

        let environment = file.environment("e/0").unwrap().to_environment();
        assert_eq!(environment.name, "Staging");
        assert_eq!(
            environment.variables,
            vec![
                Parameter::new("base", "https://staging"),
                Parameter::disabled("retries", "3"),
            ]
        );
    }

    #[test]
    fn test_renaming_the_environment_renames_the_file() {
        let mut file = PostmanEnvironmentContainer::parse("e", SAMPLE).unwrap();
        file.environment_mut("e/0").unwrap().set_name("QA").unwrap();
        assert_eq!(file.name(), "QA");
        assert!(file.is_dirty());
    }

    #[test]
    fn test_count_changes_are_unsupported() {
        let mut file = PostmanEnvironmentContainer::parse("e", SAMPLE).unwrap();
        assert!(matches!(
            file.append_environment("other"),
            Err(AdapterError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            file.delete_environment("e/0"),
            Err(AdapterError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            file.environment("e/1"),
            Err(AdapterError::NotFound(_))
        ));
    }

    #[test]
    fn test_other_scopes_are_rejected() {
        let text = SAMPLE.replace(r#""environment""#, r#""globals""#);
        let error = PostmanEnvironmentContainer::parse("e", &text).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_created_file_carries_export_stamps() {
        let file = PostmanEnvironmentContainer::create("Local").unwrap();
        let written: Value = serde_json::from_str(&file.stringify().unwrap()).unwrap();
        assert_eq!(written["_postman_variable_scope"], "environment");
        assert!(written["_postman_exported_at"].is_string());
        assert!(
            written["_postman_exported_using"]
                .as_str()
                .unwrap()
                .starts_with("netconsole/")
        );
    }
}
