/// Maximum calories accepted for a single meal entry
pub const MAX_MEAL_CALORIES: u32 = 5000;

/// Number of trailing calendar days in the weekly trend, today inclusive
pub const TREND_WINDOW_DAYS: i64 = 7;

/// Client-side timeout for the webhook relay, after which the attempt is abandoned
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message when a view requires a logged-in user
pub const ERR_NOT_LOGGED_IN: &str = "Not logged in";

/// Error message for missing registration fields
pub const ERR_MISSING_FIELDS: &str = "Name, email and phone are all required";

/// Error message for a malformed email address
pub const ERR_INVALID_EMAIL: &str = "Invalid email address";

/// Error message for a malformed phone number
pub const ERR_INVALID_PHONE: &str = "Invalid phone number";

/// Error message for a malformed calendar date
pub const ERR_INVALID_DATE: &str = "Date must be formatted as YYYY-MM-DD";

/// Error message for a malformed time of day
pub const ERR_INVALID_TIME: &str = "Time must be formatted as HH:MM (24-hour)";

/// Error message for an out-of-range calorie count
pub const ERR_CALORIES_RANGE: &str = "Calories must be between 0 and 5000";

/// Error message for an empty food items field
pub const ERR_EMPTY_FOOD_ITEMS: &str = "Food items must not be empty";
