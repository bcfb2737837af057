use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::types::{ApplicationTree, Event, ResourceStatus};

/// Fully materialized engine input, loaded from local snapshot files. An
/// omitted file is an empty input; a malformed one fails fast here, before
/// anything reaches the aggregation logic.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub tree: ApplicationTree,
    pub resources: Vec<ResourceStatus>,
    pub events: Vec<Event>,
}

impl Snapshot {
    pub fn load(
        tree: Option<&Path>,
        resources: Option<&Path>,
        events: Option<&Path>,
    ) -> Result<Self> {
        let tree = match tree {
            Some(path) => load_file(path, parse_tree)?,
            None => ApplicationTree::default(),
        };
        let resources = match resources {
            Some(path) => load_file(path, parse_resources)?,
            None => Vec::new(),
        };
        let events = match events {
            Some(path) => load_file(path, parse_events)?,
            None => Vec::new(),
        };

        debug!(
            nodes = tree.nodes.len(),
            orphaned = tree.orphaned_nodes.len(),
            hosts = tree.hosts.len(),
            resources = resources.len(),
            events = events.len(),
            "loaded snapshot"
        );

        Ok(Self {
            tree,
            resources,
            events,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

fn load_file<T>(path: &Path, parse: impl Fn(&str, Format) -> Result<T>) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot file {}", path.display()))?;
    parse(&raw, Format::for_path(path)).with_context(|| format!("parsing {}", path.display()))
}

fn from_str<T: DeserializeOwned>(raw: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(raw)?),
        Format::Yaml => Ok(serde_yaml::from_str(raw)?),
    }
}

pub fn parse_tree(raw: &str, format: Format) -> Result<ApplicationTree> {
    from_str(raw, format)
}

/// A resources file is either a bare status array or a full application
/// object, in which case `status.resources` is taken.
pub fn parse_resources(raw: &str, format: Format) -> Result<Vec<ResourceStatus>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ResourceFile {
        Items(Vec<ResourceStatus>),
        Application { status: AppStatus },
    }

    #[derive(Deserialize)]
    struct AppStatus {
        #[serde(default)]
        resources: Vec<ResourceStatus>,
    }

    Ok(match from_str(raw, format)? {
        ResourceFile::Items(items) => items,
        ResourceFile::Application { status } => status.resources,
    })
}

/// An events file is either a bare array or a Kubernetes `List` object with
/// an `items` field.
pub fn parse_events(raw: &str, format: Format) -> Result<Vec<Event>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum EventFile {
        Items(Vec<Event>),
        List {
            #[serde(default)]
            items: Vec<Event>,
        },
    }

    Ok(match from_str(raw, format)? {
        EventFile::Items(items) => items,
        EventFile::List { items } => items,
    })
}
