//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{AccessToken, Claims, JwtService};
pub use password::{hash_password, validate_password, verify_password, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
