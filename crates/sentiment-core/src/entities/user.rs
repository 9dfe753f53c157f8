//! User entity - an account that owns searches

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Registered account. Credentials live in the repository, not on the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const MIN_USERNAME_CHARS: usize = 2;
    pub const MAX_USERNAME_CHARS: usize = 32;

    /// Create a new User stamped with the current time
    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a candidate username against the length and charset rules
    pub fn is_valid_username(username: &str) -> bool {
        let len = username.chars().count();
        (Self::MIN_USERNAME_CHARS..=Self::MAX_USERNAME_CHARS).contains(&len)
            && username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_timestamps_match() {
        let user = User::new(Snowflake::new(1), "alice".to_string());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_username_rules() {
        assert!(User::is_valid_username("al"));
        assert!(User::is_valid_username("jane.doe_99"));
        assert!(!User::is_valid_username("a"));
        assert!(!User::is_valid_username(&"x".repeat(33)));
        assert!(!User::is_valid_username("has space"));
    }
}
