//! Read-only environments derived from a Swagger 2.0 document: one per
//! scheme, each defining `baseUri`.

use netconsole_application::{
    AdapterError, AdapterResult, EnvironmentAdapter, EnvironmentContainerAdapter, EnvironmentView,
};
use netconsole_domain::{EntryIndex, Environment, Parameter};
use serde_json::Value;
use url::Url;

use super::FORMAT_ID;
use super::collection::read_only;
use super::document::{load, str_field};
use crate::formats::environment::{EnvironmentNode, EnvironmentRef};

const DEFAULT_SCHEME: &str = "https";

impl EnvironmentNode for Environment {
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

/// Adapter over the environments of a Swagger 2.0 document.
#[derive(Debug)]
pub struct OpenApiEnvironmentContainer {
    id: String,
    name: String,
    index: EntryIndex,
    environments: Vec<Environment>,
    source: String,
}

impl OpenApiEnvironmentContainer {
    /// Validates `text` and derives one environment per scheme.
    ///
    /// # Errors
    ///
    /// `FormatValidation` if `text` is not a Swagger 2.0 document or its
    /// `host` is missing or does not form a valid base URI.
    pub fn parse(id: &str, text: &str) -> AdapterResult<Self> {
        let invalid = |reason: String| AdapterError::validation(FORMAT_ID, reason);

        let document = load(text)?;
        let host = str_field(&document, "host").ok_or_else(|| invalid("missing host".to_string()))?;
        let base_path = str_field(&document, "basePath").unwrap_or_default();

        let mut schemes: Vec<&str> = document
            .get("schemes")
            .and_then(Value::as_array)
            .map(|schemes| schemes.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        if schemes.is_empty() {
            schemes.push(DEFAULT_SCHEME);
        }

        let environments = schemes
            .into_iter()
            .map(|scheme| -> AdapterResult<Environment> {
                let base_uri = format!("{scheme}://{host}{base_path}");
                Url::parse(&base_uri)
                    .map_err(|e| invalid(format!("invalid base URI {base_uri}: {e}")))?;
                Ok(Environment::new(scheme).with_variable("baseUri", base_uri))
            })
            .collect::<AdapterResult<Vec<_>>>()?;

        Ok(Self {
            id: id.to_string(),
            name: str_field(&document["info"], "title")
                .unwrap_or_default()
                .to_string(),
            index: EntryIndex::new(id, environments.len()),
            environments,
            source: text.to_string(),
        })
    }
}

impl EnvironmentContainerAdapter for OpenApiEnvironmentContainer {
    fn id(&self) -> &str {
        &self.id
    }

    fn format_id(&self) -> &'static str {
        FORMAT_ID
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, _name: &str) -> AdapterResult<()> {
        Err(read_only("set_name"))
    }

    fn child_entry_ids(&self) -> Vec<String> {
        self.index.ids()
    }

    fn environment(&self, id: &str) -> AdapterResult<Box<dyn EnvironmentView + '_>> {
        let position = self.index.position(id)?;
        let environment = self
            .environments
            .get(position)
            .ok_or_else(|| AdapterError::NotFound(id.to_string()))?;
        Ok(Box::new(EnvironmentRef::new(id, environment)))
    }

    fn environment_mut(&mut self, _id: &str) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        Err(read_only("environment_mut"))
    }

    fn append_environment(
        &mut self,
        _name: &str,
    ) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>> {
        Err(read_only("append_environment"))
    }

    fn delete_environment(&mut self, _id: &str) -> AdapterResult<()> {
        Err(read_only("delete_environment"))
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn commit(&mut self) -> AdapterResult<()> {
        Err(read_only("commit"))
    }

    fn stringify(&self) -> AdapterResult<String> {
        Ok(self.source.clone())
    }
}
