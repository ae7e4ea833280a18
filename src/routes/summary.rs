use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::aggregate::{self, DailySummary};
use crate::constants::ERR_INVALID_DATE;
use crate::error::Result;
use crate::routes::load_meals_or_empty;
use crate::session;
use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// Calendar date as "YYYY-MM-DD"; defaults to today
    pub date: Option<String>,
}

/// Daily summary view: the current user's meals for one date
///
/// The client navigates by passing an explicit `date` (previous/next day,
/// back to today); the server just aggregates whatever date it is given.
pub async fn daily_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<DailySummary>> {
    let user = session::require_user(&state.store).await?;

    let date = match params.date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidInput(ERR_INVALID_DATE.to_string()))?,
        None => Local::now().date_naive(),
    };

    let meals = load_meals_or_empty(&state.store, user.email).await;

    Ok(Json(aggregate::daily_summary(&meals, date)))
}
