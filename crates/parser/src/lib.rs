//! Service model parsing for API operation catalogs
//!
//! This crate handles loading botocore-style service models (`service-2.json`)
//! and exposes a read-only [`ShapeGraph`] over their operations and shapes.
//!
//! ## Catalog layout
//!
//! - `operations`: name -> input/output shape references
//! - `shapes`: name -> record members (name -> shape) or enum values

pub mod botocore;
mod shape_graph;

pub use botocore::{Operation, ServiceModel, ServiceModelParser, Shape, ShapeReference};
pub use shape_graph::ShapeGraph;

use resource_planner_common::Result;
use std::path::Path;

/// Load a service model from a `service-2.json` file
///
/// # Arguments
/// * `path` - Path to the service model file
///
/// # Returns
/// * `ServiceModel` - The parsed operation and shape catalog
pub fn load_service_model<P: AsRef<Path>>(path: P) -> Result<ServiceModel> {
    Ok(ServiceModelParser::from_file(path)?.into_model())
}
