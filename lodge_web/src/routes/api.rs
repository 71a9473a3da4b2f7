use axum::{extract::State, Json};
use chrono::Utc;
use lodge_core::service::{calendar::FeedEvent, site::Phrase};

use crate::{error::AppError, extract::CurrentViewer, AppState};

/// Upcoming events for the calendar widget.
pub async fn events(
    State(state): State<AppState>,
    viewer: CurrentViewer,
) -> Result<Json<Vec<FeedEvent>>, AppError> {
    let feed = state
        .core
        .calendar
        .feed(viewer.viewer(), Utc::now())
        .await?;
    Ok(Json(feed))
}

pub async fn phrase_of_day(State(state): State<AppState>) -> Result<Json<Phrase>, AppError> {
    Ok(Json(state.core.site.phrase_of_day().await?))
}
