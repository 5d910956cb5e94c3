use log::info;
use std::sync::Arc;
use std::time::Instant;

use crate::application::dtos::DashboardDto;
use taskstreak_domain::activity::{ActivityReport, StreakPolicy, DEFAULT_HEATMAP_WEEKS};
use taskstreak_domain::shared::{Clock, DomainError};
use taskstreak_domain::task::TaskRepository;

#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    pub streak_policy: StreakPolicy,
    pub heatmap_weeks: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            streak_policy: StreakPolicy::default(),
            heatmap_weeks: DEFAULT_HEATMAP_WEEKS,
        }
    }
}

/// Dashboard query service
/// Streaks, statistics, badges and the heatmap from one task snapshot
pub struct DashboardQueryService {
    task_repo: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
    settings: DashboardSettings,
}

impl DashboardQueryService {
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        clock: Arc<dyn Clock>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            task_repo,
            clock,
            settings,
        }
    }

    pub async fn get_dashboard(&self) -> Result<DashboardDto, DomainError> {
        let tasks = self.task_repo.find_all().await?;

        let started_at = Instant::now();
        let report = ActivityReport::compute(
            &tasks,
            self.clock.today(),
            self.settings.streak_policy,
            self.settings.heatmap_weeks,
        );
        info!(
            "Dashboard computed for {} tasks in {}µs: current={} max={}",
            tasks.len(),
            started_at.elapsed().as_micros(),
            report.streaks.current_streak,
            report.streaks.max_streak
        );

        Ok(DashboardDto::from_report(&report, self.settings.streak_policy))
    }
}
