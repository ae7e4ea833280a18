use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_CALORIES_RANGE, ERR_EMPTY_FOOD_ITEMS, ERR_INVALID_TIME, MAX_MEAL_CALORIES,
};
use crate::models::User;

/// Kind of eating event being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Drink,
}

/// One logged eating event, stored in the per-user meal list
///
/// Records are append-only: the application never mutates or deletes them.
/// `user_email`/`user_name` duplicate the owning user's identity so each
/// record is self-describing on the relay wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub date: NaiveDate,
    /// Local time of day as zero-padded 24h "HH:MM"; kept as a string so the
    /// stored layout matches the wire format and sorts lexicographically
    pub time: String,
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
    #[serde(rename = "foodItems")]
    pub food_items: String,
    pub calories: u32,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Creation instant, distinct from the meal's own date/time fields
    pub timestamp: DateTime<Utc>,
}

/// Form fields for logging a new meal
#[derive(Debug, Clone, Deserialize)]
pub struct NewMeal {
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
    #[serde(rename = "foodItems")]
    pub food_items: String,
    pub calories: u32,
}

impl NewMeal {
    /// Validate form fields, returning the first failure message
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !validate_time(&self.time) {
            return Err(ERR_INVALID_TIME.to_string());
        }
        if self.food_items.trim().is_empty() {
            return Err(ERR_EMPTY_FOOD_ITEMS.to_string());
        }
        if self.calories > MAX_MEAL_CALORIES {
            return Err(ERR_CALORIES_RANGE.to_string());
        }
        Ok(())
    }

    /// Build the stored Meal record from the form fields plus the current
    /// user's identity and a creation instant
    pub fn into_meal(self, user: &User, timestamp: DateTime<Utc>) -> Meal {
        Meal {
            date: self.date,
            time: self.time,
            meal_type: self.meal_type,
            food_items: self.food_items,
            calories: self.calories,
            user_email: user.email.clone(),
            user_name: user.name.clone(),
            timestamp,
        }
    }
}

/// Validate a time of day as zero-padded 24h "HH:MM"
pub fn validate_time(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }

    let (hour, minute) = (&time[..2], &time[3..]);
    if !hour.chars().all(|c| c.is_ascii_digit()) || !minute.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    matches!(
        (hour.parse::<u8>(), minute.parse::<u8>()),
        (Ok(h), Ok(m)) if h < 24 && m < 60
    )
}
