//! Resource name discovery from creation-style operation names
//!
//! A resource exists wherever the catalog has an operation named
//! `<Verb><Resource>` for one of the creation verbs:
//! - CreateCluster → Cluster
//! - AddTags → Tags
//! - StartPipelineExecution → PipelineExecution
//! - RegisterDevices → Devices
//! - ImportHubContent → HubContent

use std::collections::BTreeSet;

/// Verbs whose operations introduce a resource, in partitioning priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreationVerb {
    Create,
    Add,
    Start,
    Register,
    Import,
}

impl CreationVerb {
    /// All creation verbs; partitioning consumes operations in this order
    pub const ALL: [CreationVerb; 5] = [
        CreationVerb::Create,
        CreationVerb::Add,
        CreationVerb::Start,
        CreationVerb::Register,
        CreationVerb::Import,
    ];

    /// Operation name prefix for this verb
    pub fn prefix(self) -> &'static str {
        match self {
            CreationVerb::Create => "Create",
            CreationVerb::Add => "Add",
            CreationVerb::Start => "Start",
            CreationVerb::Register => "Register",
            CreationVerb::Import => "Import",
        }
    }

    /// Resource name carried by `operation`, if it starts with this verb
    ///
    /// A bare verb ("Create") names no resource.
    pub fn resource_name(self, operation: &str) -> Option<&str> {
        operation
            .strip_prefix(self.prefix())
            .filter(|rest| !rest.is_empty())
    }
}

impl std::fmt::Display for CreationVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Candidate resource names discovered for one creation verb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroup {
    pub verb: CreationVerb,
    pub names: BTreeSet<String>,
}

impl CandidateGroup {
    /// Union of candidate names across groups: every resource the catalog knows about
    pub fn union<'a, I>(groups: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a CandidateGroup>,
    {
        groups
            .into_iter()
            .flat_map(|group| group.names.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Discover candidate resource names, one group per creation verb
///
/// Groups are returned in [`CreationVerb::ALL`] order; a verb with no
/// matching operation yields an empty group.
pub fn derive_candidates<'a, I>(operation_names: I) -> Vec<CandidateGroup>
where
    I: IntoIterator<Item = &'a str>,
{
    let operations: Vec<&str> = operation_names.into_iter().collect();

    CreationVerb::ALL
        .iter()
        .map(|&verb| CandidateGroup {
            verb,
            names: operations
                .iter()
                .filter_map(|op| verb.resource_name(op))
                .map(str::to_string)
                .collect(),
        })
        .collect()
}
