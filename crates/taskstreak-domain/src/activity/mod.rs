//! Streak and heatmap calculation.
//!
//! Everything here is a pure function of a task snapshot and "today"; nothing
//! is cached between calls.

mod daily;
mod heatmap;
mod stats;
mod streak;


use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub use daily::DailyCompletions;
pub use heatmap::{
    intensity_level, Heatmap, HeatmapCell, MonthLabel, DEFAULT_HEATMAP_WEEKS, MAX_INTENSITY,
};
pub use stats::{ActivityStats, Badges, BADGE_MILESTONES};
pub use streak::{current_streak, max_streak, StreakPolicy, StreakStats};

/// Every display aggregate derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub today: NaiveDate,
    pub stats: ActivityStats,
    pub streaks: StreakStats,
    pub badges: Badges,
    pub heatmap: Heatmap,
}

impl ActivityReport {
    pub fn compute(
        tasks: &[Task],
        today: NaiveDate,
        policy: StreakPolicy,
        heatmap_weeks: u32,
    ) -> Self {
        let daily = DailyCompletions::from_tasks(tasks);
        let streaks = StreakStats::compute(&daily, today, policy);

        Self {
            today,
            stats: ActivityStats::compute(&daily, today),
            streaks,
            badges: Badges::for_max_streak(streaks.max_streak),
            heatmap: Heatmap::build(&daily, today, heatmap_weeks),
        }
    }
}
