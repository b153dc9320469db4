//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: i64,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_email(email.as_str()).await? {
            return Err(AuthError::EmailTaken);
        }

        // Hash before insert; the cleartext is zeroized on drop
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash()?;

        let user = NewUser::new(input.name, email, password_hash.as_str());
        let user_id = self.user_repo.create(&user).await?;

        tracing::info!(user_id, "user registered");

        Ok(RegisterOutput { user_id })
    }
}
