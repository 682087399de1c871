//! The order book aggregate.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: arena storage for resting orders, O(1) keyed access
//! - **BTreeMap**: price-ordered levels per side for best-first iteration
//!   and exact-price lookup
//! - **HashMap**: order id to arena key, for O(1) cancel
//!
//! ## Price Ordering
//!
//! - **Bids**: keyed by `Reverse(price)` so the highest price iterates first
//! - **Asks**: keyed by price so the lowest price iterates first
//!
//! In both maps the first key is the best price, and matching walks levels
//! in strictly best-to-worst order, stopping early once prices no longer
//! cross.
//!
//! ## Concurrency
//!
//! One logical writer per book instance. Every operation runs synchronously
//! to completion; callers needing cross-thread access serialize externally.
//!
//! ## Example
//!
//! ```
//! use matchbook::{Orderbook, Side};
//!
//! let mut book = Orderbook::new();
//!
//! book.add_order(Side::Bid, 400_000_000, 1_000_000_000).unwrap();
//! book.add_order(Side::Ask, 500_000_000, 1_000_000_000).unwrap();
//!
//! assert_eq!(book.best_bid(), 400_000_000);
//! assert_eq!(book.best_ask(), 500_000_000);
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use slab::Slab;

use crate::orderbook::{MatchResult, PriceLevel};
use crate::types::{BookError, Order, Side};

/// Creation timestamps are informational; a clock failure degrades to 0
/// rather than failing the order.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A limit order book for one instrument.
///
/// Owns its orders, levels, and indexes exclusively; the public surface
/// hands out final order states by value and read-only lookups, never
/// mutable references into the book.
#[derive(Debug)]
pub struct Orderbook {
    /// Arena storage for resting orders.
    /// Levels and the id index hold keys into this slab, never copies.
    orders: Slab<Order>,

    /// Bid levels (first key = highest price = best bid)
    bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask levels (first key = lowest price = best ask)
    asks: BTreeMap<u64, PriceLevel>,

    /// Order id to arena key, for O(1) cancel.
    /// Holds only resting, non-terminal orders.
    ids: HashMap<u64, usize>,

    /// Cached best bid price, 0 if the bid side is empty
    best_bid: u64,

    /// Cached best ask price, 0 if the ask side is empty
    best_ask: u64,

    /// Next order id (monotonic)
    next_order_id: u64,
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Orderbook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            ids: HashMap::new(),
            best_bid: 0,
            best_ask: 0,
            next_order_id: 1,
        }
    }

    /// Create an order book with pre-allocated capacity for resting orders
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::Orderbook;
    ///
    /// let book = Orderbook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            ids: HashMap::with_capacity(order_capacity),
            best_bid: 0,
            best_ask: 0,
            next_order_id: 1,
        }
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Add a limit order: match it against the opposite side, then rest any
    /// remainder on its own side.
    ///
    /// # Returns
    ///
    /// The order's final state: fully filled, partially filled and resting,
    /// or fully resting. Fails with [`BookError`] if `price` or `qty` is not
    /// a positive fixed-point integer.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::{Orderbook, OrderStatus, Side};
    ///
    /// let mut book = Orderbook::new();
    /// book.add_order(Side::Bid, 400_000_000, 1_000_000_000).unwrap();
    ///
    /// // An ask at 3.00 crosses the resting 4.00 bid and fills at 4.00.
    /// let ask = book.add_order(Side::Ask, 300_000_000, 100_000_000).unwrap();
    /// assert_eq!(ask.status, OrderStatus::Filled);
    /// assert_eq!(ask.avg_fill_price, 400_000_000);
    /// ```
    pub fn add_order(&mut self, side: Side, price: u64, qty: u64) -> Result<Order, BookError> {
        if price == 0 {
            return Err(BookError::InvalidPrice(price));
        }
        if qty == 0 {
            return Err(BookError::InvalidQuantity(qty));
        }

        let order_id = self.next_order_id;
        self.next_order_id += 1;

        let mut order = Order::new(order_id, side, price, qty, now_millis());

        self.match_incoming(&mut order);

        // Rest the unfilled remainder on its own side.
        if order.qty_left > 0 {
            let key = self.orders.insert(order.clone());
            let level = match side {
                Side::Bid => self
                    .bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price, side)),
                Side::Ask => self
                    .asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price, side)),
            };
            level.push_back(key, &self.orders);
            self.ids.insert(order_id, key);
        }

        self.refresh_best_prices();

        Ok(order)
    }

    /// Cancel a resting order by id.
    ///
    /// Returns `false` when the id is unknown, already filled, or already
    /// cancelled. This is an expected outcome (the common cancel/fill race),
    /// deliberately indistinguishable from the return value alone.
    ///
    /// Cancellation is O(1): the order is marked and dropped from the id
    /// index, but stays physically queued in its level until that level is
    /// next scanned during matching.
    pub fn cancel_order(&mut self, order_id: u64) -> bool {
        match self.ids.remove(&order_id) {
            Some(key) => {
                self.orders
                    .get_mut(key)
                    .expect("id index references missing order")
                    .cancel();
                true
            }
            None => false,
        }
    }

    /// Match an incoming order against the opposite side's levels, best
    /// price first. Stops when prices no longer cross (`CannotMatch`: no
    /// later level can cross either) or the order fills (`Complete`).
    /// Levels emptied by the scan are pruned afterwards, in a batch, so the
    /// index is never mutated mid-iteration.
    fn match_incoming(&mut self, incoming: &mut Order) {
        let Self {
            orders: arena,
            bids,
            asks,
            ids,
            ..
        } = self;

        // Resting orders that fill completely leave the id index here;
        // their arena slots are freed by the level's prefix sweep.
        let mut on_resting_filled = |id: u64| {
            ids.remove(&id);
        };

        match incoming.side {
            Side::Bid => {
                let mut emptied: Vec<u64> = Vec::new();
                for (&price, level) in asks.iter_mut() {
                    let result = level.match_order(arena, incoming, &mut on_resting_filled);
                    if level.is_empty() {
                        emptied.push(price);
                    }
                    if result != MatchResult::Continuation {
                        break;
                    }
                }
                for price in emptied {
                    asks.remove(&price);
                }
            }
            Side::Ask => {
                let mut emptied: Vec<u64> = Vec::new();
                for (&Reverse(price), level) in bids.iter_mut() {
                    let result = level.match_order(arena, incoming, &mut on_resting_filled);
                    if level.is_empty() {
                        emptied.push(price);
                    }
                    if result != MatchResult::Continuation {
                        break;
                    }
                }
                for price in emptied {
                    bids.remove(&Reverse(price));
                }
            }
        }
    }

    /// Re-derive the cached best prices from the first key of each side.
    fn refresh_best_prices(&mut self) {
        self.best_bid = self.bids.keys().next().map(|r| r.0).unwrap_or(0);
        self.best_ask = self.asks.keys().next().copied().unwrap_or(0);
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Best (highest) bid price, 0 if the bid side is empty
    #[inline]
    pub fn best_bid(&self) -> u64 {
        self.best_bid
    }

    /// Best (lowest) ask price, 0 if the ask side is empty
    #[inline]
    pub fn best_ask(&self) -> u64 {
        self.best_ask
    }

    /// Spread (best_ask - best_bid), None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid, self.best_ask) {
            (bid, ask) if bid > 0 && ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Lookups and Size
    // ========================================================================

    /// Look up a resting order by id.
    ///
    /// Returns None for unknown ids and for orders that already filled or
    /// cancelled.
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        self.ids.get(&order_id).map(|&key| &self.orders[key])
    }

    /// Number of resting (cancellable) orders
    #[inline]
    pub fn open_orders(&self) -> usize {
        self.ids.len()
    }

    /// Check if the book holds no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Pre-allocated arena capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
