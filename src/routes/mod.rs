pub mod health;
pub mod meals;
pub mod session;
pub mod summary;
pub mod trends;

pub use health::health_check;
pub use meals::{list_meals, log_meal};
pub use session::{current_session, login, logout};
pub use summary::daily_summary;
pub use trends::weekly_trends;

use crate::models::Meal;
use crate::store::{repo, Store};

/// Load a user's meal list for a read view, degrading to empty on failure
///
/// Storage problems on read paths are logged and shown as "no data" rather
/// than surfaced as errors.
pub(crate) async fn load_meals_or_empty(store: &Store, email: String) -> Vec<Meal> {
    let db = store.clone();

    match tokio::task::spawn_blocking(move || repo::meals_for(&db, &email)).await {
        Ok(Ok(meals)) => meals,
        Ok(Err(e)) => {
            tracing::warn!("Failed to load meals, showing empty list: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Meal load task failed: {}", e);
            Vec::new()
        }
    }
}
