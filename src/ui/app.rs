use crate::snapshot::Snapshot;
use crate::stats::{self, ResourceStats, ResourceUsageStats, TreeStats};
use crate::timeline::EventQuery;
use crate::types::Event;
use crate::utils::compile_filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Filter,
    Help,
}

pub struct App {
    pub snapshot: Snapshot,

    // Query state, re-applied to the snapshot on every change
    pub query: EventQuery,
    pub filter_pattern: String,

    // Aggregates are fixed for the lifetime of the snapshot
    pub resource_stats: ResourceStats,
    pub tree_stats: TreeStats,
    pub usage: ResourceUsageStats,

    // UI state
    pub mode: AppMode,
    pub scroll_offset: usize,
    pub help_visible: bool,
}

impl App {
    pub fn new(snapshot: Snapshot, query: EventQuery, filter_pattern: String) -> Self {
        let resource_stats = stats::sync_stats(&snapshot.resources);
        let tree_stats = stats::tree_stats(&snapshot.tree);
        let usage = stats::resource_usage(&snapshot.tree.hosts);

        Self {
            snapshot,
            query,
            filter_pattern,
            resource_stats,
            tree_stats,
            usage,
            mode: AppMode::Normal,
            scroll_offset: 0,
            help_visible: false,
        }
    }

    /// The display sequence for the current query state, evaluated fresh on
    /// every call. The message filter applies on top of the engine's
    /// warnings-only filter.
    pub fn visible_events(&self) -> Vec<&Event> {
        let filter_regex = compile_filter(&self.filter_pattern);
        self.query
            .select(&self.snapshot.events)
            .into_iter()
            .filter(|e| match &filter_regex {
                Some(re) => re.is_match(&e.message),
                None => true,
            })
            .collect()
    }

    pub fn toggle_sort(&mut self) {
        self.query.sort = self.query.sort.toggled();
        self.scroll_offset = 0;
    }

    pub fn toggle_warnings_only(&mut self) {
        self.query.warnings_only = !self.query.warnings_only;
        self.scroll_offset = 0;
    }

    pub fn cycle_group_by(&mut self) {
        self.query.group_by = self.query.group_by.next();
    }

    pub fn clear_filter(&mut self) {
        self.filter_pattern.clear();
        self.scroll_offset = 0;
    }

    fn max_offset(&self) -> usize {
        self.visible_events().len().saturating_sub(1)
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_offset());
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        self.scroll_offset = (self.scroll_offset + page_size).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_offset();
    }
}
