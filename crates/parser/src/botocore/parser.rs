//! Service model file parser

use super::types::ServiceModel;
use resource_planner_common::{PlanError, Result};
use std::fs;
use std::path::Path;

/// Botocore service model parser
///
/// Reads and parses `service-2.json` files
pub struct ServiceModelParser {
    /// Loaded service model
    model: ServiceModel,
}

impl ServiceModelParser {
    /// Load a service model from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ServiceModelParser::from_file("sagemaker/2017-07-24/service-2.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PlanError::Parse(format!(
                "Failed to read service model {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content).map_err(|e| match e {
            PlanError::Parse(msg) => {
                PlanError::Parse(format!("{} ({})", msg, path.as_ref().display()))
            }
            other => other,
        })
    }

    /// Parse a service model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let model: ServiceModel = serde_json::from_str(json)
            .map_err(|e| PlanError::Parse(format!("Failed to parse service model JSON: {}", e)))?;

        Ok(Self { model })
    }

    /// Get reference to the underlying service model
    pub fn model(&self) -> &ServiceModel {
        &self.model
    }

    /// Take ownership of the service model
    pub fn into_model(self) -> ServiceModel {
        self.model
    }

    /// Service name from the model metadata, if any
    pub fn service_name(&self) -> Option<String> {
        self.model.service_name()
    }
}
