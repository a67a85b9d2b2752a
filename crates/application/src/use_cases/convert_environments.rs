//! Convert environments use case.

use crate::error::{AdapterError, AdapterResult};
use crate::ports::{EnvironmentContainerAdapter, EnvironmentFormat};

/// Copies environments from one environment file into a new file of
/// another format.
pub struct ConvertEnvironments<'f> {
    target: &'f dyn EnvironmentFormat,
}

impl<'f> ConvertEnvironments<'f> {
    /// Creates a new `ConvertEnvironments` use case writing to `target`.
    #[must_use]
    pub const fn new(target: &'f dyn EnvironmentFormat) -> Self {
        Self { target }
    }

    /// Builds a committed copy of the selected environments of `source`.
    ///
    /// `selection` lists environment identifiers of `source`; `None` selects
    /// all of them. A single-environment target is named after the one
    /// selected environment.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` if the target is read-only, or holds a single
    /// environment while more than one is selected; `NotFound` for unknown
    /// identifiers in `selection`.
    pub fn execute(
        &self,
        source: &dyn EnvironmentContainerAdapter,
        selection: Option<&[String]>,
    ) -> AdapterResult<Box<dyn EnvironmentContainerAdapter>> {
        if !self.target.can_write() {
            return Err(AdapterError::unsupported(format!(
                "{} environments are read-only",
                self.target.format_id()
            )));
        }

        let selected = selection.map_or_else(|| source.child_entry_ids(), <[String]>::to_vec);
        if !self.target.supports_multiple_environments() && selected.len() > 1 {
            return Err(AdapterError::unsupported(format!(
                "{} holds a single environment but {} were selected",
                self.target.format_id(),
                selected.len()
            )));
        }

        let environments = selected
            .iter()
            .map(|id| source.environment(id).map(|env| env.to_environment()))
            .collect::<AdapterResult<Vec<_>>>()?;

        tracing::info!(
            source = source.id(),
            target = self.target.format_id(),
            count = environments.len(),
            "converting environments"
        );

        let mut converted = if self.target.supports_multiple_environments() {
            let mut converted = self.target.create_environment_container(source.name())?;
            for environment in &environments {
                let mut copy = converted.append_environment(&environment.name)?;
                copy.set_variables(&environment.variables)?;
            }
            converted
        } else {
            let name = environments
                .first()
                .map_or_else(|| source.name(), |env| env.name.as_str());
            let mut converted = self.target.create_environment_container(name)?;
            let ids = converted.child_entry_ids();
            if let (Some(environment), Some(id)) = (environments.first(), ids.first()) {
                converted
                    .environment_mut(id)?
                    .set_variables(&environment.variables)?;
            }
            converted
        };
        converted.commit()?;
        Ok(converted)
    }
}
