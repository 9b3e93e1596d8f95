//! Botocore service model type definitions
//!
//! These types represent the structure of `service-2.json` files. Only the
//! parts the planner reads are modelled; everything else is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root service model document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceModel {
    /// Model format version (e.g., "2.0")
    #[serde(default)]
    pub version: Option<String>,

    /// Metadata about the service
    #[serde(default)]
    pub metadata: Option<ServiceMetadata>,

    /// Operation definitions keyed by operation name
    #[serde(default)]
    pub operations: IndexMap<String, Operation>,

    /// Shape definitions keyed by shape name
    #[serde(default)]
    pub shapes: IndexMap<String, Shape>,
}

/// Service-level metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    /// API version (e.g., "2017-07-24")
    #[serde(default)]
    pub api_version: Option<String>,

    /// Endpoint prefix (e.g., "api.sagemaker")
    #[serde(default)]
    pub endpoint_prefix: Option<String>,

    /// Service identifier (e.g., "SageMaker")
    #[serde(default)]
    pub service_id: Option<String>,
}

/// Operation definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name; usually repeats the map key
    #[serde(default)]
    pub name: Option<String>,

    /// Input shape
    #[serde(default)]
    pub input: Option<ShapeReference>,

    /// Output shape
    #[serde(default)]
    pub output: Option<ShapeReference>,
}

/// A shape: either a record with members or a terminal enum
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    /// Shape type (structure, string, list, ...)
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,

    /// Structure members in declaration order
    #[serde(default)]
    pub members: IndexMap<String, ShapeReference>,

    /// Allowed values for enum shapes
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,
}

/// Reference to another shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeReference {
    /// Target shape name
    pub shape: String,
}

impl ShapeReference {
    pub fn new(shape: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
        }
    }
}

impl Shape {
    /// Record shape with the given members
    pub fn structure<I, K, V>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            type_name: Some("structure".to_string()),
            members: members
                .into_iter()
                .map(|(name, target)| (name.into(), ShapeReference::new(target)))
                .collect(),
            enum_values: None,
        }
    }

    /// Terminal string enum with the given values
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: Some("string".to_string()),
            members: IndexMap::new(),
            enum_values: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

impl Operation {
    /// Operation with optional input/output shapes
    pub fn new(input: Option<&str>, output: Option<&str>) -> Self {
        Self {
            name: None,
            input: input.map(ShapeReference::new),
            output: output.map(ShapeReference::new),
        }
    }
}

impl ServiceModel {
    /// Get a shape by name
    pub fn get_shape(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Get an operation by name
    pub fn get_operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Short service name derived from the metadata
    ///
    /// Prefers the endpoint prefix with any `api.` qualifier removed
    /// ("api.sagemaker" -> "sagemaker"), falling back to the lowercased service id.
    pub fn service_name(&self) -> Option<String> {
        let metadata = self.metadata.as_ref()?;

        if let Some(prefix) = metadata.endpoint_prefix.as_deref() {
            let name = prefix.rsplit('.').next().unwrap_or(prefix);
            if !name.is_empty() {
                return Some(name.to_lowercase());
            }
        }

        metadata
            .service_id
            .as_deref()
            .map(|id| id.replace(' ', "-").to_lowercase())
    }
}
