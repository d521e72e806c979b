//! Shared identifier types for the order workflow functions.

pub mod types;

pub use types::{CustomerId, OrderId};
