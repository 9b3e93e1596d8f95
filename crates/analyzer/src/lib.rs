//! Resource inference for Resource Planner
//!
//! Derives a resource plan from a service model by grouping operations into
//! resources and classifying each operation into a method role.
//!
//! # Examples
//!
//! ```no_run
//! use resource_planner_analyzer::ResourcePlanner;
//! use resource_planner_parser::load_service_model;
//!
//! let model = load_service_model("sagemaker/2017-07-24/service-2.json").expect("load failed");
//! let plan = ResourcePlanner::new(&model).plan().expect("planning failed");
//!
//! for resource in &plan.resources {
//!     println!("{}: {:?}", resource.resource_name, resource.class_methods);
//! }
//! ```

pub mod classifier;
pub mod naming;
pub mod partition;
mod planner;
pub mod status_chain;

pub use classifier::{
    classify_resource, ClassMethod, ClassifiedResource, MethodRole, ObjectMethod,
};
pub use naming::{derive_candidates, CandidateGroup, CreationVerb};
pub use partition::{partition, ActionPool, Partition};
pub use planner::{plan_service, ResourcePlanner};
pub use status_chain::{resolve_status_chain, StatusResolution};
