//! Read-only lookups over operations and shapes
//!
//! Every lookup of a name the model does not declare is an error. An operation
//! without an input or output is fine; it simply has nothing to inspect.

use crate::botocore::{Operation, ServiceModel, Shape, ShapeReference};
use indexmap::IndexMap;
use resource_planner_common::{PlanError, Result};

/// Accessor over the operation and shape catalog of a [`ServiceModel`]
#[derive(Debug, Clone, Copy)]
pub struct ShapeGraph<'a> {
    model: &'a ServiceModel,
}

impl<'a> ShapeGraph<'a> {
    pub fn new(model: &'a ServiceModel) -> Self {
        Self { model }
    }

    /// All operation names, in declaration order
    pub fn operation_names(&self) -> impl Iterator<Item = &'a str> {
        self.model.operations.keys().map(String::as_str)
    }

    pub fn operation(&self, name: &str) -> Result<&'a Operation> {
        self.model
            .get_operation(name)
            .ok_or_else(|| PlanError::MissingOperation(name.to_string()))
    }

    pub fn shape(&self, name: &str) -> Result<&'a Shape> {
        self.model
            .get_shape(name)
            .ok_or_else(|| PlanError::MissingShape(name.to_string()))
    }

    /// Members of a record shape in declaration order
    ///
    /// Non-record shapes (enums, primitives, lists) have no members.
    pub fn members(&self, name: &str) -> Result<&'a IndexMap<String, ShapeReference>> {
        Ok(&self.shape(name)?.members)
    }

    /// Enum values of a terminal shape, `None` for anything else
    pub fn enum_values(&self, name: &str) -> Result<Option<&'a [String]>> {
        Ok(self.shape(name)?.enum_values.as_deref())
    }

    /// Name of the shape an operation takes as input, if it declares one
    pub fn input_shape(&self, operation: &str) -> Result<Option<&'a str>> {
        Ok(self
            .operation(operation)?
            .input
            .as_ref()
            .map(|r| r.shape.as_str()))
    }

    /// Name of the shape an operation returns, if it declares one
    pub fn output_shape(&self, operation: &str) -> Result<Option<&'a str>> {
        Ok(self
            .operation(operation)?
            .output
            .as_ref()
            .map(|r| r.shape.as_str()))
    }
}
