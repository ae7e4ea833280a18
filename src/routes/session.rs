use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::Result;
use crate::models::{User, UserProfile};
use crate::session;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Resolve the current session
///
/// Always succeeds; a failed or absent session read reports `user: null`.
pub async fn current_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let user = session::current_user(&state.store).await;

    Json(SessionResponse { user })
}

/// Register/log in a user
///
/// Registration and login are the same action: the profile is validated,
/// stamped with a creation instant, made the current user unconditionally,
/// and recorded in the known-users list when the email is new.
pub async fn login(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<LoginResponse>> {
    let user = session::login(&state.store, profile).await?;

    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}

/// Log out the current user
///
/// Clears the session slot only; the user's meal history is untouched.
pub async fn logout(State(state): State<AppState>) -> Result<Json<LogoutResponse>> {
    session::logout(&state.store).await?;

    Ok(Json(LogoutResponse { success: true }))
}
