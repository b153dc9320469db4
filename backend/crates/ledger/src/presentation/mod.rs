//! Presentation Layer (HTTP)

pub mod dto;
pub mod handlers;
pub mod router;
pub mod rules;
