//! Order book module for the matchbook matching core.
//!
//! ## Architecture
//!
//! - **Arena storage**: resting orders live once, in a slab; every other
//!   structure holds keys into it
//! - **Price levels**: orders grouped by exact price, FIFO within a level
//! - **Price-time priority**: better price always matches first; among
//!   equal prices, earliest insertion matches first
//! - **Lazy deletion**: cancellation marks an order and leaves it queued;
//!   physical removal is deferred to the next matching scan of its level
//!
//! ## Components
//!
//! - [`PriceLevel`]: orders at a single price with incremental matching
//! - [`MatchResult`]: per-level matching outcome
//! - [`Orderbook`]: dual price-ordered indexes plus the public
//!   add/cancel/best-price surface
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order (resting) | O(log n) |
//! | Cancel order by id | O(1) |
//! | Best bid/ask | O(1) |
//! | Match order | O(k log n), k orders touched |

pub mod book;
pub mod level;

pub use book::Orderbook;
pub use level::{MatchResult, PriceLevel};
