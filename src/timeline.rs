use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;

use crate::types::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    New,
    /// Earliest first
    Old,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::New => SortOrder::Old,
            SortOrder::Old => SortOrder::New,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::New => "new",
            SortOrder::Old => "old",
        }
    }
}

/// Time-bucket granularity. Accepted as query state and carried through the
/// interface, but grouping itself is not implemented yet; selection has no
/// effect on ordering or filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    TenSec,
    #[default]
    OneMin,
    FiveMin,
    TwentyMin,
}

impl GroupBy {
    pub fn bucket(self) -> Duration {
        match self {
            GroupBy::TenSec => Duration::seconds(10),
            GroupBy::OneMin => Duration::minutes(1),
            GroupBy::FiveMin => Duration::minutes(5),
            GroupBy::TwentyMin => Duration::minutes(20),
        }
    }

    pub fn next(self) -> Self {
        match self {
            GroupBy::TenSec => GroupBy::OneMin,
            GroupBy::OneMin => GroupBy::FiveMin,
            GroupBy::FiveMin => GroupBy::TwentyMin,
            GroupBy::TwentyMin => GroupBy::TenSec,
        }
    }

    pub fn label(self) -> String {
        let secs = self.bucket().num_seconds();
        if secs < 60 {
            format!("{}s", secs)
        } else {
            format!("{}m", secs / 60)
        }
    }
}

/// Caller-selected query state, passed by value per evaluation. The engine
/// itself keeps no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventQuery {
    pub sort: SortOrder,
    pub warnings_only: bool,
    pub group_by: GroupBy,
}

impl EventQuery {
    /// Produce the display sequence: filter, then stable sort by parsed
    /// `firstTimestamp`. Events with equal (or equally unparsable)
    /// timestamps keep their input order.
    pub fn select<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let mut keyed: Vec<(Option<DateTime<Utc>>, &Event)> = events
            .iter()
            .filter(|e| !self.warnings_only || e.is_warning())
            .map(|e| (e.instant(), e))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match self.sort {
            SortOrder::Old => a.cmp(b),
            SortOrder::New => b.cmp(a),
        });

        keyed.into_iter().map(|(_, e)| e).collect()
    }
}
