//! Status chain resolution through the shape graph
//!
//! Starting from a describe output, follow the first member whose name
//! mentions "status" until a shape carrying enum values is reached:
//!
//! ```text
//! DescribeClusterResponse.ClusterStatus -> ClusterStatus (enum)
//! DescribeEndpointOutput.EndpointStatus -> EndpointStatus (enum)
//! DescribeJobResponse.JobStatus -> JobStatusDetail.Status -> JobState (enum)
//! ```

use resource_planner_common::{PlanError, Result, StatusChainEntry};
use resource_planner_parser::ShapeGraph;
use std::collections::HashSet;

/// Status chain and the state values it ends in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusResolution {
    pub chain: Vec<StatusChainEntry>,
    pub states: Vec<String>,
}

impl StatusResolution {
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// First member of `shape` whose name contains "status" (any case)
fn status_member<'a>(
    graph: &ShapeGraph<'a>,
    shape: &str,
) -> Result<Option<(&'a str, &'a str)>> {
    Ok(graph
        .members(shape)?
        .iter()
        .find(|(name, _)| name.to_lowercase().contains("status"))
        .map(|(name, target)| (name.as_str(), target.shape.as_str())))
}

/// Resolve the status chain starting at `shape`
///
/// Returns an empty resolution when the walk reaches a record without any
/// status-like member. A shape visited twice is reported as
/// [`PlanError::CyclicStatusChain`].
pub fn resolve_status_chain(graph: &ShapeGraph<'_>, shape: &str) -> Result<StatusResolution> {
    let mut chain: Vec<StatusChainEntry> = Vec::new();
    let mut visited = HashSet::new();
    let mut current = shape.to_string();

    loop {
        if !visited.insert(current.clone()) {
            let mut walked = vec![shape.to_string()];
            walked.extend(chain.iter().map(|e| e.status_shape.clone()));
            return Err(PlanError::CyclicStatusChain {
                shape: current,
                chain: walked,
            });
        }

        let Some((member, target)) = status_member(graph, &current)? else {
            return Ok(StatusResolution::default());
        };

        chain.push(StatusChainEntry::new(member, target));

        if let Some(states) = graph.enum_values(target)? {
            return Ok(StatusResolution {
                chain,
                states: states.to_vec(),
            });
        }

        current = target.to_string();
    }
}
