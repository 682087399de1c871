//! Core data types for matchbook
//!
//! All numeric values use fixed-point representation (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Order`]: A limit order and its fill state machine
//! - [`Side`]: Bid or Ask
//! - [`OrderStatus`]: Open, PartialFill, Filled, or Cancelled
//! - [`BookError`]: Boundary validation errors
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and quantities are stored as `u64` scaled by 10^8.
//! Example: 2.30000000 is stored as 230_000_000u64

mod error;
mod order;
pub mod price;

// Re-export all types at module level
pub use error::BookError;
pub use order::{Order, OrderStatus, Side};
