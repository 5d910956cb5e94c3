use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DailyCompletions;

/// Streak lengths, in days, that unlock a badge.
pub const BADGE_MILESTONES: [u32; 7] = [50, 100, 150, 200, 250, 300, 365];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub total_completed: u32,
    /// Completions dated within the last seven days (strictly after today - 7).
    pub completed_last_7_days: u32,
    pub active_days: u32,
    pub last_completed_date: Option<NaiveDate>,
}

impl ActivityStats {
    pub fn compute(daily: &DailyCompletions, today: NaiveDate) -> Self {
        let week_ago = today - Duration::days(7);
        let completed_last_7_days = daily
            .iter()
            .filter(|(date, _)| *date > week_ago)
            .map(|(_, count)| count)
            .sum();

        Self {
            total_completed: daily.total(),
            completed_last_7_days,
            active_days: daily.active_days() as u32,
            last_completed_date: daily.last_date(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badges {
    pub earned: Vec<u32>,
    pub next_milestone: Option<u32>,
}

impl Badges {
    pub fn for_max_streak(max_streak: u32) -> Self {
        let earned = BADGE_MILESTONES
            .iter()
            .copied()
            .filter(|milestone| max_streak >= *milestone)
            .collect();
        let next_milestone = BADGE_MILESTONES
            .iter()
            .copied()
            .find(|milestone| max_streak < *milestone);

        Self {
            earned,
            next_milestone,
        }
    }
}
