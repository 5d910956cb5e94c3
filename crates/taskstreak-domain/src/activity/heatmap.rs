use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DailyCompletions;

/// Default window: 53 weeks back from today, like a contribution graph.
pub const DEFAULT_HEATMAP_WEEKS: u32 = 53;

/// Highest shade index a cell can take.
pub const MAX_INTENSITY: u8 = 4;

/// Shade bucket for a daily count: 0, 1-2, 3-5, 6-8, 9+.
pub fn intensity_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => MAX_INTENSITY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub column: usize,
    pub label: String,
}

/// Calendar grid over the trailing window.
///
/// `weeks[c][r]` is the cell for column `c` (a Monday-first week) and row `r`
/// (0 = Monday .. 6 = Sunday). Cells before the window start or after
/// `end` are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks: Vec<[Option<HeatmapCell>; 7]>,
    pub month_labels: Vec<MonthLabel>,
}

impl Heatmap {
    pub fn build(daily: &DailyCompletions, today: NaiveDate, weeks: u32) -> Self {
        let start = today - Duration::weeks(i64::from(weeks));
        let first_monday =
            start - Duration::days(i64::from(start.weekday().num_days_from_monday()));

        let mut columns: Vec<[Option<HeatmapCell>; 7]> = Vec::new();
        let mut month_labels = Vec::new();
        let mut last_month: Option<u32> = None;

        let mut week_start = first_monday;
        while week_start <= today {
            let mut column = [None; 7];
            let mut first_in_window: Option<NaiveDate> = None;

            for (row, slot) in column.iter_mut().enumerate() {
                let date = week_start + Duration::days(row as i64);
                if date < start || date > today {
                    continue;
                }
                first_in_window.get_or_insert(date);
                let count = daily.count_on(date);
                *slot = Some(HeatmapCell {
                    date,
                    count,
                    level: intensity_level(count),
                });
            }

            if let Some(date) = first_in_window {
                if last_month != Some(date.month()) {
                    month_labels.push(MonthLabel {
                        column: columns.len(),
                        label: date.format("%b").to_string(),
                    });
                    last_month = Some(date.month());
                }
            }

            columns.push(column);
            week_start += Duration::weeks(1);
        }

        Self {
            start,
            end: today,
            weeks: columns,
            month_labels,
        }
    }

    /// All in-window cells in date order.
    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }

    /// Sum of counts inside the window.
    pub fn total(&self) -> u32 {
        self.cells().map(|cell| cell.count).sum()
    }
}
