//! Assignment of operations to candidate resources
//!
//! Operations are drawn from a single [`ActionPool`]. Once an operation is
//! assigned it leaves the pool, so no later candidate (and no later verb
//! group) can claim it again.

use crate::naming::CandidateGroup;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Operations not yet assigned to any resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPool {
    remaining: BTreeSet<String>,
}

impl ActionPool {
    pub fn new<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remaining: operations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.remaining.contains(operation)
    }

    /// Remove and return every pooled operation belonging to `resource`
    pub fn take_for(&mut self, resource: &str) -> BTreeSet<String> {
        let selected: BTreeSet<String> = self
            .remaining
            .iter()
            .filter(|op| belongs_to(op, resource))
            .cloned()
            .collect();

        for op in &selected {
            self.remaining.remove(op);
        }

        selected
    }

    /// Assign pooled operations to every candidate of `group`
    ///
    /// Candidates are visited longest first so that "ClusterNode" claims
    /// `DescribeClusterNode` before "Node" or "Cluster" get the chance.
    pub fn assign(&mut self, group: &CandidateGroup) -> Vec<(String, BTreeSet<String>)> {
        let mut candidates: Vec<&String> = group.names.iter().collect();
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        candidates
            .into_iter()
            .map(|resource| {
                let actions = self.take_for(resource);
                debug!(
                    verb = %group.verb,
                    resource = %resource,
                    actions = actions.len(),
                    "assigned actions"
                );
                (resource.clone(), actions)
            })
            .collect()
    }

    /// Consume the pool, returning whatever was never assigned
    pub fn into_remaining(self) -> BTreeSet<String> {
        self.remaining
    }
}

/// Whether `operation` is named after `resource`
///
/// Either the operation ends with the resource name, or it is a listing call
/// using the plural form (`ListClusters` for "Cluster").
pub fn belongs_to(operation: &str, resource: &str) -> bool {
    operation.ends_with(resource) || is_plural_listing(operation, resource)
}

fn is_plural_listing(operation: &str, resource: &str) -> bool {
    operation.starts_with("List")
        && operation
            .strip_suffix('s')
            .is_some_and(|stem| stem.ends_with(resource))
}

/// Result of partitioning a catalog across its candidate resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Raw actions per resource name
    pub assignments: BTreeMap<String, BTreeSet<String>>,
    /// Operations that matched no resource
    pub unassigned: BTreeSet<String>,
}

impl Partition {
    /// Every operation assigned to some resource
    pub fn assigned_operations(&self) -> BTreeSet<&str> {
        self.assignments
            .values()
            .flat_map(|actions| actions.iter().map(String::as_str))
            .collect()
    }

    pub fn actions(&self, resource: &str) -> Option<&BTreeSet<String>> {
        self.assignments.get(resource)
    }
}

/// Partition `operation_names` across candidate groups
///
/// Groups are processed in the order given (Create, Add, Start, Register,
/// Import from [`crate::naming::derive_candidates`]). A name that appears in
/// several groups keeps what it already holds and gains whatever is still
/// pooled.
pub fn partition<'a, I>(operation_names: I, groups: &[CandidateGroup]) -> Partition
where
    I: IntoIterator<Item = &'a str>,
{
    let mut pool = ActionPool::new(operation_names);
    let mut assignments: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for group in groups {
        for (resource, actions) in pool.assign(group) {
            assignments.entry(resource).or_default().extend(actions);
        }
    }

    Partition {
        assignments,
        unassigned: pool.into_remaining(),
    }
}
