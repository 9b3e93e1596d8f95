//! Resource plan orchestration

use crate::{
    classifier::classify_resource,
    naming::{derive_candidates, CandidateGroup},
    partition::{partition, Partition},
};
use resource_planner_common::{PlanOverrides, PlanSummary, ResourcePlan, ResourceRecord, Result};
use resource_planner_parser::{ServiceModel, ShapeGraph};
use tracing::{debug, info, warn};

/// Resource planner - main entry point
///
/// Runs the full inference pipeline over one service model:
/// 1. derive candidate resource names from creation verbs
/// 2. partition every operation across the candidates
/// 3. classify each resource's operations into methods
/// 4. layer manual overrides and assemble the sorted plan
pub struct ResourcePlanner<'a> {
    model: &'a ServiceModel,
    overrides: PlanOverrides,
    service: Option<String>,
}

impl<'a> ResourcePlanner<'a> {
    /// Create a planner with the built-in override table
    pub fn new(model: &'a ServiceModel) -> Self {
        Self {
            model,
            overrides: PlanOverrides::builtin(),
            service: model.service_name(),
        }
    }

    /// Replace the manual override table
    pub fn with_overrides(mut self, overrides: PlanOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Name the service the plan describes
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Run the pipeline and build the plan
    pub fn plan(&self) -> Result<ResourcePlan> {
        let graph = ShapeGraph::new(self.model);
        let total_operations = graph.operation_names().count();
        info!(total_operations, "building resource plan");

        // Phase 1: resource names
        let groups = derive_candidates(graph.operation_names());
        let known_resources = CandidateGroup::union(&groups);
        for group in &groups {
            debug!(verb = %group.verb, candidates = group.names.len(), "derived candidates");
        }
        info!(total_resources = known_resources.len(), "derived resource names");

        // Phase 2: partition
        let Partition {
            assignments,
            unassigned,
        } = partition(graph.operation_names(), &groups);
        let assigned_operations: usize = assignments.values().map(|a| a.len()).sum();
        info!(
            assigned_operations,
            unassigned = unassigned.len(),
            "partitioned operations"
        );

        // Phase 3: classification
        let mut resources = Vec::with_capacity(assignments.len());
        for (resource, actions) in &assignments {
            if actions.is_empty() {
                debug!(resource = %resource, "every action went to a longer resource name");
            }

            let classified = classify_resource(&graph, resource, actions, &known_resources)?;
            let mut record = classified.into_record();
            self.apply_overrides(&mut record);
            resources.push(record);
        }

        // Phase 4: overrides that matched nothing
        for name in self.overrides.resource_names() {
            if !resources.iter().any(|r| r.resource_name == name) {
                warn!(resource = %name, "override names a resource that is not in the plan");
            }
        }

        let summary = PlanSummary {
            total_operations,
            total_resources: resources.len(),
            assigned_operations,
            unassigned_operations: unassigned.into_iter().collect(),
        };
        info!(resources = summary.total_resources, "resource plan complete");

        Ok(ResourcePlan {
            service: self.service.clone(),
            resources,
            summary,
        })
    }

    fn apply_overrides(&self, record: &mut ResourceRecord) {
        let extra: Vec<String> = self
            .overrides
            .additional_methods(&record.resource_name)
            .map(str::to_string)
            .collect();

        if extra.is_empty() {
            return;
        }

        record.additional_methods.extend(extra);
        record.additional_methods.sort();
        record.additional_methods.dedup();
    }
}

/// Build a plan for `model` with the built-in overrides (convenience function)
pub fn plan_service(model: &ServiceModel) -> Result<ResourcePlan> {
    ResourcePlanner::new(model).plan()
}
