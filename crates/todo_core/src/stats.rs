//! Priority statistics
//!
//! The backend aggregates task counts per priority. `PriorityStat` is one
//! row of that response; `PrioritySummary` is the computed view used for
//! display. A priority missing from the response counts as zero.

use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// One row of the priority-statistics endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PriorityStat {
    /// Priority this row counts (wire name `_id`, mongo aggregation key)
    #[serde(rename = "_id")]
    pub priority: Priority,

    /// Number of tasks with this priority
    pub count: u64,
}

/// Computed counts per priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrioritySummary {
    low: u64,
    medium: u64,
    high: u64,
}

impl PrioritySummary {
    pub fn from_stats(stats: &[PriorityStat]) -> Self {
        let mut summary = Self::default();
        for stat in stats {
            match stat.priority {
                Priority::Low => summary.low += stat.count,
                Priority::Medium => summary.medium += stat.count,
                Priority::High => summary.high += stat.count,
            }
        }
        summary
    }

    pub fn count_for(&self, priority: Priority) -> u64 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }

    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }

    /// Share of the total, rounded to whole percent. Zero when there are no tasks.
    pub fn percent_of_total(&self, priority: Priority) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.count_for(priority) * 100 + total / 2) / total
    }
}
