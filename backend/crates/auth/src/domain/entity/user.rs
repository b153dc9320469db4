//! User Entity

use crate::domain::value_object::email::Email;

/// A registered account
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Email,
    /// bcrypt hash, never the cleartext
    pub password_hash: String,
}

/// Account to be persisted; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: Email, password_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email,
            password_hash: password_hash.into(),
        }
    }
}
