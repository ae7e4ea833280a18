use redb::TableDefinition;

/// Session table: single current-user slot -> User (JSON)
pub const SESSION: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

/// Known-users table: email -> User (JSON), deduplicated by key
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Meals table: email -> Vec<Meal> (JSON), append-only per user
pub const MEALS: TableDefinition<&str, &[u8]> = TableDefinition::new("meals");
