use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DailyCompletions;

/// How the current streak treats a "today" that has no completion yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Today is a grace day: the streak may end yesterday.
    #[default]
    GraceDay,
    /// The streak is zero until today has a completion.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub max_streak: u32,
}

impl StreakStats {
    pub fn compute(daily: &DailyCompletions, today: NaiveDate, policy: StreakPolicy) -> Self {
        Self {
            current_streak: current_streak(daily, today, policy),
            max_streak: max_streak(daily),
        }
    }
}

/// Longest run of consecutive dates anywhere in the history.
pub fn max_streak(daily: &DailyCompletions) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for date in daily.dates() {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

/// Run of consecutive dates ending at today (or yesterday under the grace policy).
pub fn current_streak(daily: &DailyCompletions, today: NaiveDate, policy: StreakPolicy) -> u32 {
    let anchor = if daily.contains(today) {
        Some(today)
    } else {
        match policy {
            StreakPolicy::Strict => None,
            StreakPolicy::GraceDay => today.pred_opt().filter(|d| daily.contains(*d)),
        }
    };

    let mut streak = 0u32;
    let mut cursor = anchor;
    while let Some(date) = cursor {
        if !daily.contains(date) {
            break;
        }
        streak += 1;
        cursor = date.pred_opt();
    }

    streak
}
