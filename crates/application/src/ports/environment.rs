//! Uniform environment file ports.

use netconsole_domain::{Environment, Parameter};

use crate::error::AdapterResult;

/// Read access to one environment.
pub trait EnvironmentView {
    /// Stable identifier of this environment.
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// Variables, in declaration order.
    fn variables(&self) -> Vec<Parameter>;

    /// Snapshot as a domain value.
    fn to_environment(&self) -> Environment {
        Environment {
            name: self.name().to_string(),
            variables: self.variables(),
        }
    }
}

/// Write access to one environment.
///
/// # Errors
///
/// Every setter fails with `UnsupportedOperation` on read-only formats.
#[allow(clippy::missing_errors_doc)]
pub trait EnvironmentAdapter: EnvironmentView {
    /// Renames the environment.
    fn set_name(&mut self, name: &str) -> AdapterResult<()>;

    /// Replaces the variables.
    fn set_variables(&mut self, variables: &[Parameter]) -> AdapterResult<()>;
}

/// The root of an environment file.
///
/// # Errors
///
/// Lookups fail with `NotFound`; mutators fail with `UnsupportedOperation` on
/// read-only formats and, for single-environment formats, when the operation
/// would change the number of environments.
#[allow(clippy::missing_errors_doc)]
pub trait EnvironmentContainerAdapter {
    /// Identifier of this file.
    fn id(&self) -> &str;

    /// Identifier of the format backing this adapter.
    fn format_id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &str;

    /// Renames the file.
    fn set_name(&mut self, name: &str) -> AdapterResult<()>;

    /// Identifiers of the environments, in document order.
    fn child_entry_ids(&self) -> Vec<String>;

    /// Looks up an environment.
    fn environment(&self, id: &str) -> AdapterResult<Box<dyn EnvironmentView + '_>>;

    /// Looks up an environment for editing.
    fn environment_mut(&mut self, id: &str) -> AdapterResult<Box<dyn EnvironmentAdapter + '_>>;

    /// Appends an empty environment.
    fn append_environment(&mut self, name: &str)
    -> AdapterResult<Box<dyn EnvironmentAdapter + '_>>;

    /// Removes an environment.
    fn delete_environment(&mut self, id: &str) -> AdapterResult<()>;

    /// True if a mutation happened since construction or the last commit.
    fn is_dirty(&self) -> bool;

    /// Serializes the current state as the committed snapshot.
    fn commit(&mut self) -> AdapterResult<()>;

    /// The committed snapshot.
    fn stringify(&self) -> AdapterResult<String>;
}
