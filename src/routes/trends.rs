use axum::{extract::State, Json};
use chrono::Local;

use crate::aggregate::{self, WeeklyTrend};
use crate::error::Result;
use crate::routes::load_meals_or_empty;
use crate::session;
use crate::AppState;

/// Weekly trend view: calorie totals for the trailing 7 days ending today
pub async fn weekly_trends(State(state): State<AppState>) -> Result<Json<WeeklyTrend>> {
    let user = session::require_user(&state.store).await?;

    let meals = load_meals_or_empty(&state.store, user.email).await;
    let today = Local::now().date_naive();

    Ok(Json(aggregate::weekly_trend(&meals, today)))
}
