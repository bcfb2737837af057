use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One node of an application's resource tree, as served by Argo CD.
/// Identity is positional; several nodes may share a `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    #[serde(default)]
    pub kind: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub parent_refs: Vec<ParentRef>,
    #[allow(dead_code)]
    #[serde(default)]
    pub resource_version: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRef {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

/// Snapshot of the whole resource tree. Every collection uses
/// `#[serde(default)]`: an absent field is an empty one, normalized here at
/// the deserialization boundary so downstream code never sees "missing".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTree {
    #[serde(default)]
    pub nodes: Vec<ResourceNode>,
    #[serde(default)]
    pub orphaned_nodes: Vec<ResourceNode>,
    #[serde(default)]
    pub hosts: Vec<HostNode>,
}

impl ApplicationTree {
    /// In-tree plus orphaned nodes.
    pub fn total_resources(&self) -> usize {
        self.nodes.len() + self.orphaned_nodes.len()
    }
}

/// A cluster host reporting capacity and requested allocation per resource
/// kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostNode {
    #[allow(dead_code)]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resources_info: Vec<HostResourceInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostResourceInfo {
    #[serde(default)]
    pub resource_name: ResourceName,
    #[serde(default)]
    pub requested_by_app: f64,
    /// Other tenants' claim; carried for snapshot fidelity, not aggregated
    #[allow(dead_code)]
    #[serde(default)]
    pub requested_by_neighbors: f64,
    #[serde(default)]
    pub capacity: f64,
}

/// Open enum: kinds this tool does not track still deserialize cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceName {
    Cpu,
    Memory,
    Storage,
    #[default]
    #[serde(other)]
    Other,
}

/// Sync status of one tracked resource. `status` is free-form; only
/// `"OutOfSync"` is interpreted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[allow(dead_code)]
    #[serde(default)]
    pub kind: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// Event identity; `uid` keys rendering upstream and is not guaranteed
/// unique by the data source.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// An immutable lifecycle notice. The engine never mutates events, it only
/// derives ordered/filtered views over them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[allow(dead_code)]
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub first_timestamp: Option<String>,
    #[serde(default)]
    pub count: i32,
}

impl Event {
    pub fn is_warning(&self) -> bool {
        self.type_ == "Warning"
    }

    /// Strict RFC 3339 parse of `first_timestamp`. Absent or malformed
    /// timestamps yield `None`, which orders before every valid instant.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.first_timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
