use crate::types::{ApplicationTree, HostNode, ResourceName, ResourceStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    pub out_of_sync: usize,
}

/// Count resources whose live state diverged from the declared one.
pub fn sync_stats(resources: &[ResourceStatus]) -> ResourceStats {
    ResourceStats {
        out_of_sync: resources.iter().filter(|r| r.status == "OutOfSync").count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub pods: usize,
}

/// Count pods among in-tree nodes. Orphaned nodes are excluded: a detached
/// pod no longer belongs to the running topology.
pub fn tree_stats(tree: &ApplicationTree) -> TreeStats {
    TreeStats {
        pods: tree.nodes.iter().filter(|n| n.kind == "Pod").count(),
    }
}

/// Aggregate pressure per tracked kind. `None` means no capacity was
/// reported for that kind, so the ratio is undefined; it is never coerced
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsageStats {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
}

#[derive(Default)]
struct Accum {
    requested: f64,
    capacity: f64,
}

impl Accum {
    fn add(&mut self, requested: f64, capacity: f64) {
        self.requested += requested;
        self.capacity += capacity;
    }

    /// Percentage of capacity requested, rounded to two decimals.
    fn percent(&self) -> Option<f64> {
        if self.capacity == 0.0 {
            return None;
        }
        Some((self.requested / self.capacity * 10_000.0).round() / 100.0)
    }
}

/// Average CPU and memory pressure across all hosts. CPU and memory are
/// totalled independently; storage and unknown kinds are ignored.
pub fn resource_usage(hosts: &[HostNode]) -> ResourceUsageStats {
    let mut cpu = Accum::default();
    let mut memory = Accum::default();

    for host in hosts {
        for info in &host.resources_info {
            match info.resource_name {
                ResourceName::Cpu => cpu.add(info.requested_by_app, info.capacity),
                ResourceName::Memory => memory.add(info.requested_by_app, info.capacity),
                ResourceName::Storage | ResourceName::Other => {}
            }
        }
    }

    ResourceUsageStats {
        cpu: cpu.percent(),
        memory: memory.percent(),
    }
}

/// Three-tier pressure classification. Total over all reals: anything not
/// below a threshold (including NaN) lands in the highest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureLevel {
    Ok,
    Warn,
    Critical,
}

impl PressureLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            PressureLevel::Ok
        } else if percent < 75.0 {
            PressureLevel::Warn
        } else {
            PressureLevel::Critical
        }
    }
}
