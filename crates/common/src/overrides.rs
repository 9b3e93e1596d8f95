//! Manual override table loading from YAML files
//!
//! Some API operations belong to a resource without following the naming
//! convention at all. This module loads a table of fixed additional methods per
//! resource that is layered on top of the inferred methods.
//!
//! ```yaml
//! version: 1
//! resources:
//!   Cluster:
//!     additional_methods: [DescribeClusterNode, ListClusterNodes]
//! ```

use crate::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const SUPPORTED_VERSION: u32 = 1;

/// Root structure for override YAML files
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlanOverrides {
    /// Override format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Overrides keyed by resource name (e.g., "Cluster")
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceOverride>,
}

/// Fixed additions for a single resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceOverride {
    /// Operation names recorded as additional methods of the resource
    #[serde(default)]
    pub additional_methods: BTreeSet<String>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl PlanOverrides {
    /// Empty table
    pub fn none() -> Self {
        Self::default()
    }

    /// Overrides shipped with the planner for the SageMaker catalog
    pub fn builtin() -> Self {
        let mut overrides = Self::none();
        overrides.add("Cluster", ["DescribeClusterNode", "ListClusterNodes"]);
        overrides
    }

    /// Load overrides from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PlanError::Config(format!("Failed to read override file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            PlanError::Config(msg) => PlanError::Config(format!("{:?}: {}", path, msg)),
            other => other,
        })
    }

    /// Parse overrides from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(yaml)
            .map_err(|e| PlanError::Config(format!("Failed to parse override YAML: {}", e)))?;

        if overrides.version != SUPPORTED_VERSION {
            return Err(PlanError::Config(format!(
                "Unsupported override version {} (expected {})",
                overrides.version, SUPPORTED_VERSION
            )));
        }

        Ok(overrides)
    }

    /// Add fixed methods for `resource`
    pub fn add<I, S>(&mut self, resource: &str, methods: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources
            .entry(resource.to_string())
            .or_default()
            .additional_methods
            .extend(methods.into_iter().map(Into::into));
    }

    /// Layer `other` on top of this table; methods for the same resource are unioned
    pub fn merge(mut self, other: PlanOverrides) -> Self {
        for (resource, entry) in other.resources {
            self.add(&resource, entry.additional_methods);
        }
        self
    }

    /// Additional methods configured for `resource`
    pub fn additional_methods(&self, resource: &str) -> impl Iterator<Item = &str> {
        self.resources
            .get(resource)
            .into_iter()
            .flat_map(|entry| entry.additional_methods.iter().map(String::as_str))
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
