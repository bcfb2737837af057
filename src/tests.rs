#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::snapshot::{self, Format};
    use crate::stats::{self, PressureLevel};
    use crate::timeline::{EventQuery, GroupBy, SortOrder};
    use crate::types::{
        ApplicationTree, Event, HostNode, HostResourceInfo, ObjectMeta, ResourceName,
        ResourceNode, ResourceStatus,
    };
    use crate::utils;
    use clap::Parser;

    fn status(value: &str) -> ResourceStatus {
        ResourceStatus {
            status: value.to_string(),
            ..Default::default()
        }
    }

    fn node(kind: &str) -> ResourceNode {
        ResourceNode {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    fn host(entries: Vec<(ResourceName, f64, f64)>) -> HostNode {
        HostNode {
            resources_info: entries
                .into_iter()
                .map(|(name, requested, capacity)| HostResourceInfo {
                    resource_name: name,
                    requested_by_app: requested,
                    capacity,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn event(type_: &str, ts: &str, uid: &str) -> Event {
        Event {
            metadata: ObjectMeta {
                uid: uid.to_string(),
                ..Default::default()
            },
            type_: type_.to_string(),
            first_timestamp: Some(ts.to_string()),
            ..Default::default()
        }
    }

    fn uids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.metadata.uid.clone()).collect()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["argocd-timeline"]).unwrap();
        assert_eq!(cli.sort, SortOrder::New);
        assert_eq!(cli.group_by, GroupBy::OneMin);
        assert!(!cli.warnings_only);
        assert!(cli.tree.is_none());
        assert!(cli.grep.is_none());
    }

    #[test]
    fn test_cli_parsing_query_state() {
        let cli = Cli::try_parse_from([
            "argocd-timeline",
            "--sort",
            "old",
            "-w",
            "--group-by",
            "five-min",
            "--grep",
            "backoff",
        ])
        .unwrap();
        assert_eq!(cli.sort, SortOrder::Old);
        assert!(cli.warnings_only);
        assert_eq!(cli.group_by, GroupBy::FiveMin);
        assert_eq!(cli.grep, Some("backoff".to_string()));
    }

    #[test]
    fn test_cli_parsing_snapshot_paths() {
        let cli = Cli::try_parse_from([
            "argocd-timeline",
            "-t",
            "tree.json",
            "-r",
            "app.yaml",
            "-e",
            "events.json",
        ])
        .unwrap();
        assert_eq!(cli.tree.unwrap().to_str(), Some("tree.json"));
        assert_eq!(cli.resources.unwrap().to_str(), Some("app.yaml"));
        assert_eq!(cli.events.unwrap().to_str(), Some("events.json"));
    }

    #[test]
    fn test_sync_stats_counts_out_of_sync() {
        let resources = vec![status("Synced"), status("OutOfSync"), status("OutOfSync")];
        assert_eq!(stats::sync_stats(&resources).out_of_sync, 2);
    }

    #[test]
    fn test_sync_stats_empty() {
        assert_eq!(stats::sync_stats(&[]).out_of_sync, 0);
    }

    #[test]
    fn test_tree_stats_counts_pods_in_nodes_only() {
        let tree = ApplicationTree {
            nodes: vec![node("Pod"), node("Deployment"), node("Pod")],
            orphaned_nodes: vec![node("Pod")],
            hosts: Vec::new(),
        };
        assert_eq!(stats::tree_stats(&tree).pods, 2);
        assert_eq!(tree.total_resources(), 4);
    }

    #[test]
    fn test_tree_stats_empty_tree() {
        assert_eq!(stats::tree_stats(&ApplicationTree::default()).pods, 0);
    }

    #[test]
    fn test_resource_usage_percentage() {
        let hosts = vec![host(vec![(ResourceName::Cpu, 50.0, 200.0)])];
        let usage = stats::resource_usage(&hosts);
        assert_eq!(usage.cpu, Some(25.0));
        assert_eq!(usage.memory, None);
    }

    #[test]
    fn test_resource_usage_totals_across_hosts() {
        let hosts = vec![
            host(vec![
                (ResourceName::Cpu, 50.0, 100.0),
                (ResourceName::Memory, 10.0, 40.0),
            ]),
            host(vec![
                (ResourceName::Cpu, 25.0, 100.0),
                (ResourceName::Memory, 10.0, 40.0),
            ]),
        ];
        let usage = stats::resource_usage(&hosts);
        assert_eq!(usage.cpu, Some(37.5));
        assert_eq!(usage.memory, Some(25.0));
    }

    #[test]
    fn test_resource_usage_rounds_to_two_decimals() {
        let hosts = vec![host(vec![(ResourceName::Cpu, 1.0, 3.0)])];
        assert_eq!(stats::resource_usage(&hosts).cpu, Some(33.33));
    }

    #[test]
    fn test_resource_usage_zero_capacity_is_undefined_not_zero() {
        let hosts = vec![host(vec![(ResourceName::Cpu, 5.0, 0.0)])];
        let usage = stats::resource_usage(&hosts);
        assert_eq!(usage.cpu, None);
    }

    #[test]
    fn test_resource_usage_ignores_storage() {
        let hosts = vec![host(vec![
            (ResourceName::Storage, 500.0, 1000.0),
            (ResourceName::Cpu, 10.0, 100.0),
        ])];
        let usage = stats::resource_usage(&hosts);
        assert_eq!(usage.cpu, Some(10.0));
        assert_eq!(usage.memory, None);
    }

    #[test]
    fn test_pressure_level_thresholds() {
        assert_eq!(PressureLevel::from_percent(49.99), PressureLevel::Ok);
        assert_eq!(PressureLevel::from_percent(50.0), PressureLevel::Warn);
        assert_eq!(PressureLevel::from_percent(74.99), PressureLevel::Warn);
        assert_eq!(PressureLevel::from_percent(75.0), PressureLevel::Critical);
        assert_eq!(PressureLevel::from_percent(-10.0), PressureLevel::Ok);
        assert_eq!(PressureLevel::from_percent(200.0), PressureLevel::Critical);
    }

    #[test]
    fn test_query_warnings_only() {
        let events = vec![
            event("Warning", "2024-01-01T00:00:00Z", "a"),
            event("Normal", "2024-01-02T00:00:00Z", "b"),
            event("Warning", "2024-01-03T00:00:00Z", "c"),
        ];
        let query = EventQuery {
            warnings_only: true,
            ..Default::default()
        };
        let result = query.select(&events);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|e| e.is_warning()));
    }

    #[test]
    fn test_query_sort_new_is_descending() {
        let events = vec![
            event("Normal", "2024-01-01T00:00:00Z", "a"),
            event("Normal", "2024-01-03T00:00:00Z", "b"),
            event("Normal", "2024-01-02T00:00:00Z", "c"),
        ];
        let query = EventQuery {
            sort: SortOrder::New,
            ..Default::default()
        };
        assert_eq!(uids(&query.select(&events)), ["b", "c", "a"]);
    }

    #[test]
    fn test_query_sort_old_is_ascending() {
        let events = vec![
            event("Normal", "2024-01-01T00:00:00Z", "a"),
            event("Normal", "2024-01-03T00:00:00Z", "b"),
            event("Normal", "2024-01-02T00:00:00Z", "c"),
        ];
        let query = EventQuery {
            sort: SortOrder::Old,
            ..Default::default()
        };
        assert_eq!(uids(&query.select(&events)), ["a", "c", "b"]);
    }

    #[test]
    fn test_query_equal_timestamps_keep_input_order() {
        let events = vec![
            event("Normal", "2024-01-01T00:00:00Z", "a"),
            event("Normal", "2024-01-01T00:00:00Z", "b"),
            event("Normal", "2024-01-01T00:00:00Z", "c"),
        ];
        for sort in [SortOrder::New, SortOrder::Old] {
            let query = EventQuery {
                sort,
                ..Default::default()
            };
            assert_eq!(uids(&query.select(&events)), ["a", "b", "c"]);
        }
    }

    #[test]
    fn test_query_is_idempotent() {
        let events = vec![
            event("Warning", "2024-01-02T00:00:00Z", "a"),
            event("Normal", "2024-01-01T00:00:00Z", "b"),
            event("Warning", "2024-01-03T00:00:00Z", "c"),
        ];
        let query = EventQuery {
            sort: SortOrder::New,
            warnings_only: true,
            ..Default::default()
        };
        assert_eq!(uids(&query.select(&events)), uids(&query.select(&events)));
    }

    #[test]
    fn test_query_unparsable_timestamp_orders_before_valid() {
        let events = vec![
            event("Normal", "2024-01-02T00:00:00Z", "a"),
            event("Normal", "not-a-timestamp", "b"),
            event("Normal", "2024-01-01T00:00:00Z", "c"),
        ];
        let old = EventQuery {
            sort: SortOrder::Old,
            ..Default::default()
        };
        assert_eq!(uids(&old.select(&events)), ["b", "c", "a"]);

        let new = EventQuery {
            sort: SortOrder::New,
            ..Default::default()
        };
        assert_eq!(uids(&new.select(&events)), ["a", "c", "b"]);
    }

    #[test]
    fn test_query_group_by_has_no_observable_effect() {
        let events = vec![
            event("Warning", "2024-01-01T00:00:10Z", "a"),
            event("Normal", "2024-01-01T00:05:00Z", "b"),
        ];
        let baseline = EventQuery::default().select(&events);
        for group_by in [
            GroupBy::TenSec,
            GroupBy::OneMin,
            GroupBy::FiveMin,
            GroupBy::TwentyMin,
        ] {
            let query = EventQuery {
                group_by,
                ..Default::default()
            };
            assert_eq!(uids(&query.select(&events)), uids(&baseline));
        }
    }

    #[test]
    fn test_query_end_to_end() {
        let events = vec![
            event("Warning", "2024-01-01T00:00:00Z", "w"),
            event("Normal", "2024-01-02T00:00:00Z", "n"),
        ];

        let all = EventQuery {
            sort: SortOrder::New,
            ..Default::default()
        };
        assert_eq!(uids(&all.select(&events)), ["n", "w"]);

        let warnings = EventQuery {
            sort: SortOrder::New,
            warnings_only: true,
            ..Default::default()
        };
        assert_eq!(uids(&warnings.select(&events)), ["w"]);
    }

    #[test]
    fn test_group_by_buckets() {
        assert_eq!(GroupBy::TenSec.bucket().num_seconds(), 10);
        assert_eq!(GroupBy::OneMin.bucket().num_seconds(), 60);
        assert_eq!(GroupBy::FiveMin.bucket().num_seconds(), 300);
        assert_eq!(GroupBy::TwentyMin.bucket().num_seconds(), 1200);
        assert_eq!(GroupBy::TenSec.label(), "10s");
        assert_eq!(GroupBy::TwentyMin.label(), "20m");
    }

    #[test]
    fn test_group_by_cycles_through_all_variants() {
        let start = GroupBy::TenSec;
        let mut current = start;
        for _ in 0..4 {
            current = current.next();
        }
        assert_eq!(current, start);
    }

    #[test]
    fn test_sort_order_toggles() {
        assert_eq!(SortOrder::New.toggled(), SortOrder::Old);
        assert_eq!(SortOrder::Old.toggled(), SortOrder::New);
    }

    #[test]
    fn test_parse_tree_missing_collections_are_empty() {
        let tree = snapshot::parse_tree("{}", Format::Json).unwrap();
        assert!(tree.nodes.is_empty());
        assert!(tree.orphaned_nodes.is_empty());
        assert!(tree.hosts.is_empty());
    }

    #[test]
    fn test_parse_tree_json() {
        let raw = r#"{
            "nodes": [{"kind": "Pod", "resourceVersion": "42"}],
            "hosts": [{
                "name": "node-1",
                "resourcesInfo": [
                    {"resourceName": "cpu", "requestedByApp": 2.0, "requestedByNeighbors": 1.0, "capacity": 8.0}
                ]
            }]
        }"#;
        let tree = snapshot::parse_tree(raw, Format::Json).unwrap();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].kind, "Pod");
        assert_eq!(tree.hosts[0].resources_info[0].resource_name, ResourceName::Cpu);
        assert_eq!(tree.hosts[0].resources_info[0].capacity, 8.0);
    }

    #[test]
    fn test_parse_tree_yaml() {
        let raw = "nodes:\n  - kind: Pod\n  - kind: Service\norphanedNodes:\n  - kind: ConfigMap\n";
        let tree = snapshot::parse_tree(raw, Format::Yaml).unwrap();
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.orphaned_nodes.len(), 1);
    }

    #[test]
    fn test_parse_tree_unknown_resource_name() {
        let raw = r#"{"hosts": [{"resourcesInfo": [{"resourceName": "ephemeral-storage", "capacity": 1.0}]}]}"#;
        let tree = snapshot::parse_tree(raw, Format::Json).unwrap();
        assert_eq!(
            tree.hosts[0].resources_info[0].resource_name,
            ResourceName::Other
        );
    }

    #[test]
    fn test_parse_events_bare_array() {
        let raw = r#"[{"type": "Warning", "reason": "BackOff", "firstTimestamp": "2024-01-01T00:00:00Z"}]"#;
        let events = snapshot::parse_events(raw, Format::Json).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_warning());
        assert!(events[0].instant().is_some());
    }

    #[test]
    fn test_parse_events_list_object() {
        let raw = r#"{"kind": "List", "items": [{"type": "Normal", "message": "Started container"}]}"#;
        let events = snapshot::parse_events(raw, Format::Json).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Started container");
    }

    #[test]
    fn test_parse_resources_bare_array() {
        let raw = r#"[{"kind": "Deployment", "status": "OutOfSync"}]"#;
        let resources = snapshot::parse_resources(raw, Format::Json).unwrap();
        assert_eq!(stats::sync_stats(&resources).out_of_sync, 1);
    }

    #[test]
    fn test_parse_resources_from_application_object() {
        let raw = r#"{
            "metadata": {"name": "demo"},
            "status": {
                "resources": [
                    {"kind": "Service", "status": "Synced"},
                    {"kind": "Deployment", "status": "OutOfSync"}
                ]
            }
        }"#;
        let resources = snapshot::parse_resources(raw, Format::Json).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(stats::sync_stats(&resources).out_of_sync, 1);
    }

    #[test]
    fn test_parse_malformed_input_fails() {
        assert!(snapshot::parse_tree("not json", Format::Json).is_err());
        assert!(snapshot::parse_events(r#"{"items": "nope"}"#, Format::Json).is_err());
    }

    #[test]
    fn test_event_instant_rejects_malformed_timestamps() {
        assert!(event("Normal", "2024-01-01T00:00:00Z", "a").instant().is_some());
        assert!(event("Normal", "yesterday", "b").instant().is_none());
        let no_ts = Event::default();
        assert!(no_ts.instant().is_none());
    }

    #[test]
    fn test_compile_filter() {
        assert!(utils::compile_filter("").is_none());
        assert!(utils::compile_filter("(unclosed").is_none());
        let re = utils::compile_filter("backoff").unwrap();
        assert!(re.is_match("Back-off restarting failed container: BackOff"));
    }

    #[test]
    fn test_humanize_age() {
        let two_hours_ago = chrono::Utc::now() - chrono::Duration::hours(2);
        assert_eq!(utils::humanize_age(two_hours_ago), "2h ago");
        let future = chrono::Utc::now() + chrono::Duration::hours(1);
        assert_eq!(utils::humanize_age(future), "just now");
    }
}
