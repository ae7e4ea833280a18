use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Meal, NewMeal};
use crate::relay::RelayOutcome;
use crate::routes::load_meals_or_empty;
use crate::session;
use crate::store::repo;
use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    /// Whether the local save succeeded; this is the definitive result
    pub saved: bool,
    /// How the webhook relay ended; informational only
    pub relay: RelayOutcome,
    /// Updated per-user meal count, absent when the save failed
    #[serde(rename = "mealCount")]
    pub meal_count: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
    pub count: usize,
}

/// Log one meal: validate, persist locally, then best-effort relay
///
/// The local append is the save of record. Its failure is logged and reported
/// as `saved: false` but never aborts the flow; the relay attempt still runs
/// and its outcome never affects `saved`.
pub async fn log_meal(
    State(state): State<AppState>,
    Json(payload): Json<NewMeal>,
) -> Result<Json<LogMealResponse>> {
    // 1. Require a logged-in user
    let user = session::require_user(&state.store).await?;

    // 2. Validate form fields before any write
    payload.validate().map_err(AppError::InvalidInput)?;

    // 3. Build the record and append it to the per-user list (the definitive save)
    let meal = payload.into_meal(&user, Utc::now());

    let db = state.store.clone();
    let email = user.email.clone();
    let stored = meal.clone();

    let save_result = tokio::task::spawn_blocking(move || repo::append_meal(&db, &email, &stored))
        .await
        .map_err(AppError::from)
        .and_then(|r| r);

    let (saved, meal_count) = match save_result {
        Ok(count) => {
            tracing::info!("Meal saved for {}: {} total", user.email, count);
            (true, Some(count))
        }
        Err(e) => {
            tracing::error!("Failed to save meal for {}: {}", user.email, e);
            (false, None)
        }
    };

    // 4. Best-effort relay; every failure mode is swallowed
    let relay = state.relay.forward(&meal, &user).await;

    Ok(Json(LogMealResponse {
        saved,
        relay,
        meal_count,
    }))
}

/// List all stored meals for the current user
pub async fn list_meals(State(state): State<AppState>) -> Result<Json<MealListResponse>> {
    let user = session::require_user(&state.store).await?;

    let meals = load_meals_or_empty(&state.store, user.email).await;
    let count = meals.len();

    Ok(Json(MealListResponse { meals, count }))
}
