use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::task::Task;

/// Number of tasks completed per calendar date.
///
/// Dates without completions are absent; `count_on` reports them as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyCompletions {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DailyCompletions {
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut counts = BTreeMap::new();
        for date in tasks.into_iter().filter_map(|task| task.completed_date()) {
            *counts.entry(date).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut counts = BTreeMap::new();
        for date in dates {
            *counts.entry(date).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.counts.contains_key(&date)
    }

    /// Sum of all counts, i.e. the number of completed tasks.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct dates with at least one completion.
    pub fn active_days(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct completion dates, ascending.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.counts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(date, count)| (*date, *count))
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.counts.keys().next_back().copied()
    }
}
