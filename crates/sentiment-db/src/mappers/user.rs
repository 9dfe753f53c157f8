//! User model -> entity mapper

use sentiment_core::{Snowflake, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
