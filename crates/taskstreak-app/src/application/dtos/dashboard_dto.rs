use serde::{Deserialize, Serialize};

use taskstreak_domain::activity::{ActivityReport, Heatmap, StreakPolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    pub today: String,
    pub stats: ActivityStatsDto,
    pub streak: StreakDto,
    pub badges: BadgesDto,
    pub heatmap: HeatmapDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStatsDto {
    pub total_completed: u32,
    pub completed_last_7_days: u32,
    pub active_days: u32,
    pub last_completed_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub current_streak: u32,
    pub max_streak: u32,
    pub policy: StreakPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesDto {
    pub earned: Vec<u32>,
    pub next_milestone: Option<u32>,
    /// Days still needed on the best streak to reach `next_milestone`.
    pub days_to_next: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapCellDto {
    pub date: String,
    pub count: u32,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthLabelDto {
    pub column: usize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDto {
    pub start_date: String,
    pub end_date: String,
    pub total: u32,
    /// One entry per week column, Monday first; `None` outside the window.
    pub weeks: Vec<Vec<Option<HeatmapCellDto>>>,
    pub month_labels: Vec<MonthLabelDto>,
}

impl From<&Heatmap> for HeatmapDto {
    fn from(heatmap: &Heatmap) -> Self {
        let weeks = heatmap
            .weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| {
                        cell.as_ref().map(|c| HeatmapCellDto {
                            date: c.date.to_string(),
                            count: c.count,
                            level: c.level,
                        })
                    })
                    .collect()
            })
            .collect();

        Self {
            start_date: heatmap.start.to_string(),
            end_date: heatmap.end.to_string(),
            total: heatmap.total(),
            weeks,
            month_labels: heatmap
                .month_labels
                .iter()
                .map(|m| MonthLabelDto {
                    column: m.column,
                    label: m.label.clone(),
                })
                .collect(),
        }
    }
}

impl DashboardDto {
    pub fn from_report(report: &ActivityReport, policy: StreakPolicy) -> Self {
        let max_streak = report.streaks.max_streak;

        Self {
            today: report.today.to_string(),
            stats: ActivityStatsDto {
                total_completed: report.stats.total_completed,
                completed_last_7_days: report.stats.completed_last_7_days,
                active_days: report.stats.active_days,
                last_completed_date: report.stats.last_completed_date.map(|d| d.to_string()),
            },
            streak: StreakDto {
                current_streak: report.streaks.current_streak,
                max_streak,
                policy,
            },
            badges: BadgesDto {
                earned: report.badges.earned.clone(),
                next_milestone: report.badges.next_milestone,
                days_to_next: report
                    .badges
                    .next_milestone
                    .map(|m| m.saturating_sub(max_streak)),
            },
            heatmap: HeatmapDto::from(&report.heatmap),
        }
    }
}
