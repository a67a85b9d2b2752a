//! Native environment files: one file, many environments.

use netconsole_application::{
    AdapterError, AdapterResult, EnvironmentAdapter, EnvironmentContainerAdapter, EnvironmentView,
};
use netconsole_domain::{DirtyFlag, EntryIndex, Parameter, generate_id};
use serde_json::Value;

use super::FORMAT_ID;
use super::types::{NativeEnvironment, NativeEnvironmentDocument};
use crate::formats::environment::{EnvironmentMut, EnvironmentNode, EnvironmentRef};
use crate::serialization::{from_value, to_json_stable, validate_json};

impl EnvironmentNode for NativeEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn variables(&self) -> Vec<Parameter> {
        self.variables.clone()
    }

    fn set_variables(&mut self, variables: &[Parameter]) {
        self.variables = variables.to_vec();
    }
}

/// Adapter over a native environment file.
#[derive(Debug)]
pub struct NativeEnvironmentContainer {
    id: String,
    document: NativeEnvironmentDocument,
    index: EntryIndex,
    dirty: DirtyFlag,
    snapshot: String,
}

impl NativeEnvironmentContainer {
    /// Creates an empty file named `name`.
    ///
    /// # Errors
    ///
    /// `Serialization` if the initial snapshot cannot be written.
    pub fn create(name: &str) -> AdapterResult<Self> {
        let document = NativeEnvironmentDocument::new(name);
        let snapshot = to_json_stable(&document)?;
        Ok(Self::wrap(generate_id(), document, snapshot))
    }

    /// Wraps `text`, which becomes the committed snapshot.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a native environment file.
    pub fn parse(id: &str, text: &str) -> AdapterResult<Self> {
        let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

        let value = validate_json(text).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
        if value
            .get("meta")
            .and_then(|meta| meta.get("networkConsoleEnvironmentVersion"))
            .is_none()
        {
            return Err(invalid(
                "missing meta.networkConsoleEnvironmentVersion".to_string(),
            ));
        }
        if !value.get("name").is_some_and(Value::is_string) {
            return Err(invalid("missing environment file name".to_string()));
        }
        if !value.get("environments").is_some_and(Value::is_array) {
            return Err(invalid("environments must be an array".to_string()));
        }
        let document: NativeEnvironmentDocument =
            from_value(value).map_err(|e| invalid(format!("malformed environments: {e}")))?;

        tracing::debug!(format = FORMAT_ID, id, "environments parsed");
        Ok(Self::wrap(id.to_string(), document, text.to_string()))
    }

    fn wrap(id: String, document: NativeEnvironmentDocument, snapshot: String) -> Self {
        let index = EntryIndex::new(id.clone(), document.environments.len());
        Self {
            id,
            document,
            index,
            dirty: DirtyFlag::new(),
            snapshot,
        }
    }
}

impl EnvironmentContainerAdapter for NativeEnvironmentContainer {
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
        self.document.name = name.to_string();
        self.dirty.mark();
        Ok(())
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.index.ids()
    }

    fn environment(&self, id: &str) -> AdapterResult<Box<dyn EnvironmentView + '_>> {
        let position = self.index.position(id)?;
        let environment = self
            .document
            .environments
            .get(position)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        Ok(Box::new(EnvironmentRef::new(id, environment)))
    }

    fn environment_mut(&mut self, id: &str) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        let position = self.index.position(id)?;
        let environment = self
            .document
            .environments
            .get_mut(position)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        Ok(Box::new(EnvironmentMut::new(id, environment, &self.dirty)))
    }

    fn append_environment(
        &mut self,
        name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        let id = self.index.issue()?;
        self.document.environments.push(NativeEnvironment::new(name));
        self.dirty.mark();
        self.environment_mut(&id)
    }

    fn delete_environment(&mut self, id: &str) -> AdapterResult<()> {
        let position = self.index.position(id)?;
        if position >= self.document.environments.len() {
            return Err(AdapterError::NotFound(id.to_string()));
        }
        self.index.remove(id)?;
        self.document.environments.remove(position);
        self.dirty.mark();
        Ok(())
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
        "meta": {"networkConsoleEnvironmentVersion": "1.0"},
        "name": "Team",
        "environments": [
            {"name": "dev", "variables": [{"key": "base", "value": "http://localhost"}]},
            {"name": "prod", "variables": [{"key": "base", "value": "https://api", "enabled": false}]}
        ]
    }"#;

    #[test]
    fn test_parse_lists_environments() {
        let file = NativeEnvironmentContainer::parse("env", SAMPLE).unwrap();

        assert_eq!(file.name(), "Team");
        assert_eq!(file.child_entry_ids(), vec!["env/0", "env/1"]);
        let prod = file.environment("env/1").unwrap();
        assert_eq!(prod.name(), "prod");
        assert!(!prod.variables()[0].enabled);
    }

    #[test]
    fn test_missing_meta_is_rejected() {
        let result = NativeEnvironmentContainer::parse("env", r#"{"name": "x", "environments": []}"#);
        assert!(matches!(
            result,
            Err(AdapterError::FormatValidation { reason, .. })
                if reason == "missing meta.networkConsoleEnvironmentVersion"
        ));
    }

    #[test]
    fn test_append_after_delete_issues_fresh_id() {
        let mut file = NativeEnvironmentContainer::parse("env", SAMPLE).unwrap();
        file.delete_environment("env/0").unwrap();
        {
            let mut staging = file.append_environment("staging").unwrap();
            assert_eq!(staging.id(), "env/2");
            staging
                .set_variables(&[Parameter::new("base", "https://staging")])
                .unwrap();
        }

        assert_eq!(file.child_entry_ids(), vec!["env/1", "env/2"]);
        assert!(file.is_dirty());
        file.commit().unwrap();

        let reparsed = NativeEnvironmentContainer::parse("env", &file.stringify().unwrap()).unwrap();
        let staging = reparsed.environment("env/1").unwrap().to_environment();
        assert_eq!(staging.value_of("base"), Some("https://staging"));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut file = NativeEnvironmentContainer::parse("env", SAMPLE).unwrap();
        assert!(matches!(
            file.environment("env/9"),
            Err(AdapterError::NotFound(_))
        ));
        assert!(matches!(
            file.delete_environment("other/0"),
            Err(AdapterError::NotFound(_))
        ));
    }
}
