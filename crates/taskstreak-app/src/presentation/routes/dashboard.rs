use axum::extract::State;
use axum::Json;

use super::SharedState;
use crate::application::dtos::DashboardDto;
use crate::presentation::error::CommandError;

/// Stats, streaks, badges and heatmap for the current task snapshot.
pub async fn get_dashboard(
    State(state): State<SharedState>,
) -> Result<Json<DashboardDto>, CommandError> {
    let dashboard = state.queries.dashboard.get_dashboard().await?;
    Ok(Json(dashboard))
}
