//! Common types and utilities for the Resource Planner
//!
//! This crate contains the plan data structures, error types, and the manual
//! override table shared across the parser, analyzer, generator, and CLI
//! components.

pub mod overrides;

pub use overrides::{PlanOverrides, ResourceOverride};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type tag written for every planned resource
pub const RESOURCE_TYPE: &str = "resource";

/// Errors that can occur while building or emitting a resource plan
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Operation '{0}' is not declared in the service model")]
    MissingOperation(String),

    #[error("Shape '{0}' is not declared in the service model")]
    MissingShape(String),

    #[error("Status chain revisits shape '{shape}' (walked: {})", .chain.join(" -> "))]
    CyclicStatusChain { shape: String, chain: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Emit error: {0}")]
    Emit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, PlanError>;

/// One hop of a status chain: the member holding the status and the shape it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChainEntry {
    pub status: String,
    pub status_shape: String,
}

impl StatusChainEntry {
    pub fn new(status: impl Into<String>, status_shape: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            status_shape: status_shape.into(),
        }
    }
}

/// A single row of the resource plan
///
/// Field names match the persisted column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub resource_name: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    /// Class-level methods (create, list, get, ...), sorted
    pub class_methods: Vec<String>,

    /// Instance-level methods (refresh, delete, wait, ...), sorted
    pub object_methods: Vec<String>,

    /// Other resources referenced by name on creation, sorted
    pub chain_resource_name: Vec<String>,

    /// Operations that follow no known naming convention, sorted
    pub additional_methods: Vec<String>,

    /// Every operation assigned to this resource, sorted
    pub raw_actions: Vec<String>,

    /// Members followed from the describe output to the state enum
    pub resource_status_chain: Vec<StatusChainEntry>,

    /// Enum values of the final status shape, in declaration order
    pub resource_states: Vec<String>,
}

impl ResourceRecord {
    /// Empty record for `name`, tagged with [`RESOURCE_TYPE`]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            resource_name: name.into(),
            resource_type: RESOURCE_TYPE.to_string(),
            class_methods: Vec::new(),
            object_methods: Vec::new(),
            chain_resource_name: Vec::new(),
            additional_methods: Vec::new(),
            raw_actions: Vec::new(),
            resource_status_chain: Vec::new(),
            resource_states: Vec::new(),
        }
    }

    pub fn has_class_method(&self, method: &str) -> bool {
        self.class_methods.iter().any(|m| m == method)
    }

    pub fn has_object_method(&self, method: &str) -> bool {
        self.object_methods.iter().any(|m| m == method)
    }
}

/// Counts collected while building a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_operations: usize,
    pub total_resources: usize,
    pub assigned_operations: usize,
    /// Operations that matched no resource, sorted
    pub unassigned_operations: Vec<String>,
}

/// The finished resource plan, records sorted by resource name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePlan {
    /// Service the plan was derived from (e.g., "sagemaker")
    #[serde(default)]
    pub service: Option<String>,

    pub resources: Vec<ResourceRecord>,

    #[serde(default)]
    pub summary: PlanSummary,
}

impl ResourcePlan {
    /// Look up a planned resource by name
    pub fn resource(&self, name: &str) -> Option<&ResourceRecord> {
        self.resources
            .binary_search_by(|r| r.resource_name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.resources[idx])
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|r| r.resource_name.as_str())
    }
}
