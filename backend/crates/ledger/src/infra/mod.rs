//! Infrastructure Layer

pub mod postgres;
pub mod receipts;
