//! Auth Module
//!
//! Account registration and credential verification.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Passwords are bcrypt hashed at cost 12 and never logged
//! - Login failure is one message and one status; unknown email and wrong
//!   password are indistinguishable, including in timing
//! - Request bodies pass sanitize, field allow-list and validation before
//!   any value reaches a use case

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::auth_router;
