//! Method classification for a resource's operations
//!
//! Each operation is reduced to a verb token by cutting the resource name
//! out of it (`DeleteCluster` under "Cluster" → `delete`), and the token
//! decides the method role:
//! - class-level verbs: create, add, start, register, import, list, get
//! - instance-level verbs: refresh, delete, update, stop, deregister, wait, wait_for_status
//! - anything else keeps the full operation name as an additional method
//!
//! `describe` maps to class `get` plus instance `refresh` and drives the
//! status chain and wait semantics of the resource.

use crate::status_chain::{resolve_status_chain, StatusResolution};
use resource_planner_common::{ResourceRecord, Result};
use resource_planner_parser::ShapeGraph;
use std::collections::BTreeSet;
use tracing::debug;

/// Methods callable on the resource class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassMethod {
    Create,
    Add,
    Start,
    Register,
    Import,
    List,
    Get,
}

impl ClassMethod {
    pub const ALL: [ClassMethod; 7] = [
        ClassMethod::Create,
        ClassMethod::Add,
        ClassMethod::Start,
        ClassMethod::Register,
        ClassMethod::Import,
        ClassMethod::List,
        ClassMethod::Get,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClassMethod::Create => "create",
            ClassMethod::Add => "add",
            ClassMethod::Start => "start",
            ClassMethod::Register => "register",
            ClassMethod::Import => "import",
            ClassMethod::List => "list",
            ClassMethod::Get => "get",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }
}

/// Methods callable on a resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectMethod {
    Refresh,
    Delete,
    Update,
    Stop,
    Deregister,
    Wait,
    WaitForStatus,
}

impl ObjectMethod {
    pub const ALL: [ObjectMethod; 7] = [
        ObjectMethod::Refresh,
        ObjectMethod::Delete,
        ObjectMethod::Update,
        ObjectMethod::Stop,
        ObjectMethod::Deregister,
        ObjectMethod::Wait,
        ObjectMethod::WaitForStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectMethod::Refresh => "refresh",
            ObjectMethod::Delete => "delete",
            ObjectMethod::Update => "update",
            ObjectMethod::Stop => "stop",
            ObjectMethod::Deregister => "deregister",
            ObjectMethod::Wait => "wait",
            ObjectMethod::WaitForStatus => "wait_for_status",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }
}

/// Role an operation plays on its resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRole {
    Class(ClassMethod),
    Object(ObjectMethod),
    /// Operation outside the naming convention, kept under its full name
    Additional(String),
}

impl MethodRole {
    /// Role for `action` given its verb token
    pub fn from_token(token: Option<&str>, action: &str) -> Self {
        match token {
            Some(token) => {
                if let Some(method) = ClassMethod::from_token(token) {
                    MethodRole::Class(method)
                } else if let Some(method) = ObjectMethod::from_token(token) {
                    MethodRole::Object(method)
                } else {
                    MethodRole::Additional(action.to_string())
                }
            }
            None => MethodRole::Additional(action.to_string()),
        }
    }
}

const DESCRIBE: &str = "describe";
const CREATE: &str = "create";

/// Lowercased part of `action` in front of the first occurrence of `resource`
///
/// `None` when the resource name does not occur in the action at all.
pub fn verb_token(action: &str, resource: &str) -> Option<String> {
    let action = action.to_lowercase();
    let resource = resource.to_lowercase();
    action.find(&resource).map(|idx| action[..idx].to_string())
}

/// Wait method for a resource, given the states its status chain resolved to
///
/// Jobs get `wait`; anything with an "in service" state gets
/// `wait_for_status`. Never both.
pub fn wait_method(resource: &str, states: &[String]) -> Option<ObjectMethod> {
    let lower = resource.to_lowercase();
    if lower.ends_with("job") || lower.ends_with("jobv2") {
        return Some(ObjectMethod::Wait);
    }

    states
        .iter()
        .any(|state| state.replace('_', "").to_lowercase().contains("inservice"))
        .then_some(ObjectMethod::WaitForStatus)
}

/// Resource name referenced by an input member such as `ClusterName` or `SubnetNames`
fn referenced_resource(member: &str) -> Option<&str> {
    member
        .strip_suffix("Name")
        .or_else(|| member.strip_suffix("Names"))
        .filter(|name| !name.is_empty())
}

/// Other known resources named in the input of a create operation
pub fn chain_resources(
    graph: &ShapeGraph<'_>,
    create_action: &str,
    resource: &str,
    known_resources: &BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    let Some(input) = graph.input_shape(create_action)? else {
        return Ok(BTreeSet::new());
    };

    Ok(graph
        .members(input)?
        .keys()
        .filter_map(|member| referenced_resource(member))
        .filter(|name| *name != resource && known_resources.contains(*name))
        .map(str::to_string)
        .collect())
}

/// Shape the status chain of a describe action starts from
///
/// Outputs wrapping a single record (`{"Cluster": {...}}`) are unwrapped so
/// the status fields of the record itself are searched.
fn status_root<'a>(graph: &ShapeGraph<'a>, describe_action: &str) -> Result<Option<&'a str>> {
    let Some(output) = graph.output_shape(describe_action)? else {
        return Ok(None);
    };
    let members = graph.members(output)?;

    if members.len() == 1 {
        if let Some((_, only)) = members.first() {
            return Ok(Some(only.shape.as_str()));
        }
    }

    Ok(Some(output))
}

/// Methods and lifecycle information inferred for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedResource {
    pub name: String,
    pub class_methods: BTreeSet<ClassMethod>,
    pub object_methods: BTreeSet<ObjectMethod>,
    pub additional_methods: BTreeSet<String>,
    pub chain_resources: BTreeSet<String>,
    pub raw_actions: BTreeSet<String>,
    pub status: StatusResolution,
}

impl ClassifiedResource {
    fn new(name: &str, raw_actions: &BTreeSet<String>) -> Self {
        Self {
            name: name.to_string(),
            raw_actions: raw_actions.clone(),
            ..Self::default()
        }
    }

    fn apply(&mut self, role: MethodRole) {
        match role {
            MethodRole::Class(method) => {
                self.class_methods.insert(method);
            }
            MethodRole::Object(method @ (ObjectMethod::Wait | ObjectMethod::WaitForStatus)) => {
                // wait and wait_for_status are mutually exclusive; first one wins
                if !self.has_wait() {
                    self.object_methods.insert(method);
                }
            }
            MethodRole::Object(method) => {
                self.object_methods.insert(method);
            }
            MethodRole::Additional(action) => {
                self.additional_methods.insert(action);
            }
        }
    }

    pub fn has_wait(&self) -> bool {
        self.object_methods.contains(&ObjectMethod::Wait)
            || self.object_methods.contains(&ObjectMethod::WaitForStatus)
    }

    /// Plan row for this resource; every method list sorted by name
    pub fn into_record(self) -> ResourceRecord {
        let mut record = ResourceRecord::new(self.name);

        record.class_methods = sorted(self.class_methods.iter().map(|m| m.as_str()));
        record.object_methods = sorted(self.object_methods.iter().map(|m| m.as_str()));
        record.chain_resource_name = self.chain_resources.into_iter().collect();
        record.additional_methods = self.additional_methods.into_iter().collect();
        record.raw_actions = self.raw_actions.into_iter().collect();
        record.resource_status_chain = self.status.chain;
        record.resource_states = self.status.states;

        record
    }
}

fn sorted<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = names.map(str::to_string).collect();
    names.sort();
    names
}

/// Classify every raw action of `resource`
///
/// Actions are visited in name order; the first describe action resolves the
/// status chain and picks the wait method.
pub fn classify_resource(
    graph: &ShapeGraph<'_>,
    resource: &str,
    actions: &BTreeSet<String>,
    known_resources: &BTreeSet<String>,
) -> Result<ClassifiedResource> {
    let mut classified = ClassifiedResource::new(resource, actions);
    let mut status_resolved = false;

    for action in actions {
        let token = verb_token(action, resource);

        match token.as_deref() {
            Some(DESCRIBE) => {
                classified.apply(MethodRole::Class(ClassMethod::Get));
                classified.apply(MethodRole::Object(ObjectMethod::Refresh));

                if !status_resolved {
                    if let Some(root) = status_root(graph, action)? {
                        classified.status = resolve_status_chain(graph, root)?;
                    }
                    if let Some(wait) = wait_method(resource, &classified.status.states) {
                        classified.apply(MethodRole::Object(wait));
                    }
                    status_resolved = true;
                }
                continue;
            }
            Some(CREATE) => {
                let chained = chain_resources(graph, action, resource, known_resources)?;
                classified.chain_resources.extend(chained);
            }
            _ => {}
        }

        classified.apply(MethodRole::from_token(token.as_deref(), action));
    }

    debug!(
        resource = %resource,
        class_methods = classified.class_methods.len(),
        object_methods = classified.object_methods.len(),
        additional = classified.additional_methods.len(),
        states = classified.status.states.len(),
        "classified resource"
    );

    Ok(classified)
}
