//! Environment wrappers shared by every environment dialect.

use netconsole_application::{AdapterResult, EnvironmentAdapter, EnvironmentView};
use netconsole_domain::{DirtyFlag, Parameter};

/// One environment of an environment document.
pub trait EnvironmentNode: 'static {
    /// Display name.
    fn name(&self) -> &str;
    /// Renames the environment.
    fn set_name(&mut self, name: &str);
    /// Variables, in declaration order.
    fn variables(&self) -> Vec<Parameter>;
    /// Replaces the variables.
    fn set_variables(&mut self, variables: &[Parameter]);
}

/// Read-only wrapper around an environment.
pub struct EnvironmentRef<'a, E: EnvironmentNode> {
    id: String,
    node: &'a E,
}

impl<'a, E: EnvironmentNode> EnvironmentRef<'a, E> {
    pub(crate) fn new(id: impl Into<String>, node: &'a E) -> Self {
        Self {
            id: id.into(),
            node,
        }
    }
}

impl<E: EnvironmentNode> EnvironmentView for EnvironmentRef<'_, E> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn variables(&self) -> Vec<Parameter> {
        self.node.variables()
    }
}

/// Editing wrapper around an environment. Setters mark the file dirty.
pub struct EnvironmentMut<'a, E: EnvironmentNode> {
    id: String,
    node: &'a mut E,
    dirty: &'a DirtyFlag,
}

impl<'a, E: EnvironmentNode> EnvironmentMut<'a, E> {
    pub(crate) fn new(id: impl Into<String>, node: &'a mut E, dirty: &'a DirtyFlag) -> Self {
        Self {
            id: id.into(),
            node,
            dirty,
        }
    }
}

impl<E: EnvironmentNode> EnvironmentView for EnvironmentMut<'_, E> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.node.name()
    }

    fn variables(&self) -> Vec<Parameter> {
        self.node.variables()
    }
}

impl<E: EnvironmentNode> EnvironmentAdapter for EnvironmentMut<'_, E> {
    fn set_name(&mut self, name: &str) -> AdapterResult<()> {
        self.node.set_name(name);
        self.dirty.mark();
        Ok(())
    }

    fn set_variables(&mut self, variables: &[Parameter]) -> AdapterResult<()> {
        self.node.set_variables(variables);
        self.dirty.mark();
        Ok(())
    }
}
