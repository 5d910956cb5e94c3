use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::queries::DashboardSettings;
use crate::presentation::state::AppState;
use taskstreak_domain::shared::{Clock, SystemClock};
use taskstreak_domain::task::TaskRepository;
use taskstreak_infrastructure::config::{AppConfig, StoreBackend};
use taskstreak_infrastructure::firestore::FirestoreTaskRepository;
use taskstreak_infrastructure::persistence::{repositories::SqliteTaskRepository, Database};

pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::with_offset_minutes(
        config.utc_offset_minutes,
    )?);
    info!(
        "🕒 Clock offset {} min, today is {}",
        config.utc_offset_minutes,
        clock.today()
    );

    let task_repo = build_task_repository(config).await?;

    let state = AppState::new(
        task_repo,
        clock,
        DashboardSettings {
            streak_policy: config.streak_policy,
            heatmap_weeks: config.heatmap_weeks,
        },
    );

    info!(
        "✓ Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );
    Ok(state)
}

async fn build_task_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn TaskRepository>> {
    match config.store {
        StoreBackend::Firestore => {
            let credentials = config.credentials_blob()?;
            let repo = FirestoreTaskRepository::from_settings(
                &config.firestore,
                credentials.as_deref(),
            )
            .context("Failed to configure Firestore task store")?;
            Ok(Arc::new(repo))
        }
        StoreBackend::Sqlite => {
            let db_path = config.sqlite_path()?;
            let db_path_str = db_path.to_str().context("Invalid database path")?;
            info!("🔌 Connecting to database: {}", db_path_str);

            let started_at = Instant::now();
            let db = Database::new(db_path_str).await?;
            db.run_migrations().await?;
            info!(
                "✓ Database ready ({}ms)",
                started_at.elapsed().as_millis()
            );

            Ok(Arc::new(SqliteTaskRepository::new(Arc::new(
                db.pool().clone(),
            ))))
        }
    }
}
