//! Session/identity management: the single "current user" for this device.
//!
//! Registration and login are the same action. There is no credential check;
//! logging in unconditionally replaces whoever was current before.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{User, UserProfile};
use crate::store::{repo, Store};

/// Resolve the current user, if any
///
/// Any store failure is logged and reported as "no user" so a degraded store
/// looks like a logged-out session instead of an error.
pub async fn current_user(store: &Store) -> Option<User> {
    let db = store.clone();

    match tokio::task::spawn_blocking(move || repo::read_session(&db)).await {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => {
            tracing::warn!("Failed to read session, treating as logged out: {}", e);
            None
        }
        Err(e) => {
            tracing::warn!("Session read task failed: {}", e);
            None
        }
    }
}

/// Resolve the current user or fail with `NotLoggedIn`
pub async fn require_user(store: &Store) -> Result<User> {
    current_user(store).await.ok_or(AppError::NotLoggedIn)
}

/// Register/log in a user: stamp `createdAt`, make them current, and record
/// them in the known-users list
///
/// The known-users append is best-effort: a failure there is logged and
/// swallowed, and the login still succeeds. The session write is the one
/// step that must stick.
pub async fn login(store: &Store, profile: UserProfile) -> Result<User> {
    profile.validate().map_err(AppError::InvalidInput)?;

    let user = profile.into_user(Utc::now());
    let db = store.clone();
    let stored = user.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        repo::write_session(&db, &stored)?;

        match repo::remember_user(&db, &stored) {
            Ok(true) => tracing::info!("New user registered: {}", stored.email),
            Ok(false) => tracing::info!("Returning user logged in: {}", stored.email),
            Err(e) => tracing::warn!("Failed to record user in known-users list: {}", e),
        }

        Ok(())
    })
    .await??;

    Ok(user)
}

/// Log out the current user; their meal history is left intact
pub async fn logout(store: &Store) -> Result<()> {
    let db = store.clone();

    tokio::task::spawn_blocking(move || repo::clear_session(&db)).await??;

    tracing::info!("User logged out");
    Ok(())
}
