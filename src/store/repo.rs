//! Typed repository over the embedded store.
//!
//! All persistence goes through these functions rather than ad-hoc key
//! construction at call sites. Functions are synchronous redb transactions;
//! handlers run them inside `tokio::task::spawn_blocking`.

use redb::{Database, ReadableTable};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{Meal, User};
use crate::store::tables;

/// Key of the single current-user slot in the session table
pub const SESSION_KEY: &str = "current_user";

/// Decode a stored JSON value, treating undecodable bytes as absent
///
/// A value that no longer parses degrades to "no data" instead of failing
/// the whole read; the event is logged for diagnosis.
fn decode_or_absent<T: DeserializeOwned>(what: &str, bytes: &[u8]) -> Option<T> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding undecodable {} record: {}", what, e);
            None
        }
    }
}

/// Read the current-session slot
pub fn read_session(db: &Database) -> Result<Option<User>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::SESSION)?;

    let user = table
        .get(SESSION_KEY)?
        .and_then(|bytes| decode_or_absent("session", bytes.value()));

    Ok(user)
}

/// Write the current-session slot, replacing any previous user unconditionally
pub fn write_session(db: &Database, user: &User) -> Result<()> {
    let bytes = serde_json::to_vec(user)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(tables::SESSION)?;
        table.insert(SESSION_KEY, bytes.as_slice())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Clear the current-session slot; meal history is untouched
pub fn clear_session(db: &Database) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(tables::SESSION)?;
        table.remove(SESSION_KEY)?;
    }
    write_txn.commit()?;

    Ok(())
}

/// List all known users (every identity that has ever registered on this device)
pub fn known_users(db: &Database) -> Result<Vec<User>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::USERS)?;

    let mut users = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        if let Some(user) = decode_or_absent::<User>("user", value.value()) {
            users.push(user);
        }
    }

    Ok(users)
}

/// Add a user to the known-users table unless the email is already present
///
/// Returns `true` when the user was inserted, `false` when the email was
/// already known (the existing record is left untouched).
pub fn remember_user(db: &Database, user: &User) -> Result<bool> {
    let bytes = serde_json::to_vec(user)?;

    let write_txn = db.begin_write()?;
    let inserted = {
        let mut table = write_txn.open_table(tables::USERS)?;
        if table.get(user.email.as_str())?.is_some() {
            false
        } else {
            table.insert(user.email.as_str(), bytes.as_slice())?;
            true
        }
    };
    write_txn.commit()?;

    Ok(inserted)
}

/// Load the full meal list for a user; absent or undecodable lists are empty
pub fn meals_for(db: &Database, email: &str) -> Result<Vec<Meal>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::MEALS)?;

    let meals = table
        .get(email)?
        .and_then(|bytes| decode_or_absent("meal list", bytes.value()))
        .unwrap_or_default();

    Ok(meals)
}

/// Append one meal to a user's list, returning the new list length
///
/// Read-modify-write of the whole list in a single write transaction; there
/// is no partial-append primitive. An undecodable existing list is replaced
/// by a fresh one holding only the new meal.
pub fn append_meal(db: &Database, email: &str, meal: &Meal) -> Result<u64> {
    let write_txn = db.begin_write()?;
    let count = {
        let mut table = write_txn.open_table(tables::MEALS)?;

        let mut meals: Vec<Meal> = table
            .get(email)?
            .and_then(|bytes| decode_or_absent("meal list", bytes.value()))
            .unwrap_or_default();

        meals.push(meal.clone());
        let bytes = serde_json::to_vec(&meals)?;
        table.insert(email, bytes.as_slice())?;

        meals.len() as u64
    };
    write_txn.commit()?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, NewMeal, UserProfile};
    use crate::store::open_store;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> crate::Store {
        open_store(temp_dir.path().join("test.db")).expect("Failed to create test store")
    }

    fn test_user(email: &str) -> User {
        UserProfile {
            name: "Jamie".to_string(),
            email: email.to_string(),
            phone: "+15551234567".to_string(),
        }
        .into_user(Utc::now())
    }

    fn test_meal(user: &User, calories: u32) -> Meal {
        NewMeal {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time: "08:00".to_string(),
            meal_type: MealType::Breakfast,
            food_items: "oatmeal".to_string(),
            calories,
        }
        .into_meal(user, Utc::now())
    }

    #[test]
    fn test_session_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);

        assert!(read_session(&db).unwrap().is_none());

        let user = test_user("a@x.com");
        write_session(&db, &user).unwrap();
        assert_eq!(read_session(&db).unwrap().unwrap().email, "a@x.com");

        clear_session(&db).unwrap();
        assert!(read_session(&db).unwrap().is_none());
    }

    #[test]
    fn test_session_replaced_unconditionally() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);

        write_session(&db, &test_user("a@x.com")).unwrap();
        write_session(&db, &test_user("b@x.com")).unwrap();

        assert_eq!(read_session(&db).unwrap().unwrap().email, "b@x.com");
    }

    #[test]
    fn test_remember_user_deduplicates_by_email() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);

        assert!(remember_user(&db, &test_user("a@x.com")).unwrap());
        assert!(!remember_user(&db, &test_user("a@x.com")).unwrap());
        assert!(remember_user(&db, &test_user("b@x.com")).unwrap());

        let users = known_users(&db).unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_append_meal_grows_list() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);
        let user = test_user("a@x.com");

        assert!(meals_for(&db, &user.email).unwrap().is_empty());

        assert_eq!(append_meal(&db, &user.email, &test_meal(&user, 300)).unwrap(), 1);
        assert_eq!(append_meal(&db, &user.email, &test_meal(&user, 450)).unwrap(), 2);

        let meals = meals_for(&db, &user.email).unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].calories, 300);
        assert_eq!(meals[1].calories, 450);
    }

    #[test]
    fn test_meal_lists_are_scoped_per_user() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);
        let a = test_user("a@x.com");
        let b = test_user("b@x.com");

        append_meal(&db, &a.email, &test_meal(&a, 300)).unwrap();

        assert_eq!(meals_for(&db, &a.email).unwrap().len(), 1);
        assert!(meals_for(&db, &b.email).unwrap().is_empty());
    }

    #[test]
    fn test_undecodable_meal_list_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);

        // Plant garbage bytes under the user's key
        let write_txn = db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(tables::MEALS).unwrap();
            table.insert("a@x.com", b"not json".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        assert!(meals_for(&db, "a@x.com").unwrap().is_empty());

        // Appending on top of the garbage starts a fresh list
        let user = test_user("a@x.com");
        assert_eq!(append_meal(&db, "a@x.com", &test_meal(&user, 200)).unwrap(), 1);
        assert_eq!(meals_for(&db, "a@x.com").unwrap().len(), 1);
    }

    #[test]
    fn test_undecodable_session_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_store(&temp_dir);

        let write_txn = db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(tables::SESSION).unwrap();
            table.insert(SESSION_KEY, b"{broken".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        assert!(read_session(&db).unwrap().is_none());
    }
}
