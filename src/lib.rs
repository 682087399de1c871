//! # matchbook
//!
//! The matching core of a limit order book: accepts buy/sell limit orders
//! at a price and quantity, matches them against resting opposite-side
//! interest under price-time priority, and maintains the residual book
//! state.
//!
//! ## Architecture
//!
//! - **Types**: Order lifecycle state machine, fixed-point boundary helpers
//! - **Orderbook**: slab-backed order arena, price-ordered level indexes,
//!   lazy-deletion cancellation
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the book's state after operation N is a pure
//!    function of operations 1..N
//! 2. **No Floating Point**: all matching math is integer fixed-point
//!    (10^8 scaling); decimal conversion happens only at the boundary
//! 3. **Single Writer**: one logical writer per book instance, synchronous
//!    operations, no internal locking
//! 4. **Amortized Cancellation**: cancel is O(1); physical removal is paid
//!    lazily by the next matching scan
//!
//! ## Example
//!
//! ```
//! use matchbook::{Orderbook, OrderStatus, Side};
//!
//! let mut book = Orderbook::new();
//!
//! // A resting bid, then an ask that crosses it.
//! book.add_order(Side::Bid, 400_000_000, 1_000_000_000).unwrap();
//! let ask = book.add_order(Side::Ask, 300_000_000, 100_000_000).unwrap();
//!
//! // The ask fills at the resting bid's price.
//! assert_eq!(ask.status, OrderStatus::Filled);
//! assert_eq!(ask.avg_fill_price, 400_000_000);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, OrderStatus, BookError
pub mod types;

/// Order book: arena-backed levels and the matching surface
pub mod orderbook;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use orderbook::{MatchResult, Orderbook, PriceLevel};
pub use types::{BookError, Order, OrderStatus, Side};
