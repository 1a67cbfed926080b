//! Выпуск и проверка JWT, хеширование паролей.

pub mod jwt;
pub mod password;

pub use jwt::{issue_token, verify_token, Claims};
pub use password::{hash_password, verify_password};
