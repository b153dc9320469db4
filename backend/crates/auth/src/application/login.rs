//! Login Use Case
//!
//! Verifies credentials. Unknown email and wrong password produce the
//! same error, and the unknown-email path still performs one bcrypt
//! verification so response timing does not reveal which it was.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword, hash_dummy};

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = input.email.trim().to_lowercase();

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_email(&email).await?;

        let Some(user) = user else {
            // Burn the same work a real verification would
            hash_dummy();
            return Err(AuthError::InvalidCredentials);
        };

        let stored = HashedPassword::from_stored(&user.password_hash)?;
        if !stored.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "user logged in");

        Ok(LoginOutput {
            id: user.id,
            name: user.name,
            email: user.email.into_string(),
        })
    }
}
