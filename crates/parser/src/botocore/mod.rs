//! Botocore service model parser
//!
//! Parses the `service-2.json` documents shipped with botocore and the AWS
//! SDKs into [`ServiceModel`].
//!
//! ## Format
//! A service model contains:
//! - `metadata` describing the service (API version, endpoint prefix)
//! - `operations` keyed by name, each referencing input/output shapes
//! - `shapes` keyed by name: structures with `members`, enums with `enum`
//!
//! Member and operation order is preserved as declared in the file.
//!
//! ## Usage
//! ```rust,ignore
//! use resource_planner_parser::ServiceModelParser;
//!
//! let parser = ServiceModelParser::from_file("sagemaker/2017-07-24/service-2.json")?;
//! let model = parser.model();
//! ```

mod parser;
mod types;

pub use parser::ServiceModelParser;
pub use types::*;
