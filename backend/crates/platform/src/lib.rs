//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, constant-time comparison)
//! - Password hashing (bcrypt, cost factor 12)
//! - Fixed-window rate limiting
//! - Input sanitization and field allow-listing
//! - Declarative field validation
//! - Client identification helpers

pub mod client;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
pub mod validate;
