//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` holds every order resting at one exact price on one side,
//! in time priority: a FIFO queue of arena keys, oldest at the front. The
//! order data itself lives in the book's slab arena; the level only holds
//! keys, never copies.
//!
//! ## Queue Structure
//!
//! ```text
//! front (oldest) ... back (newest)
//! ```
//!
//! - New orders are appended at the back
//! - Matching consumes from the front
//! - Cancelled orders are skipped during matching and removed lazily:
//!   the scan counts them, then pops the counted prefix in one pass
//!
//! ## The Contiguous-Prefix Invariant
//!
//! The scan advances past an order only when it was cancelled or became
//! filled, never past a still-active order. Terminal orders therefore form
//! a contiguous prefix at removal time, and popping `remove_count` keys from
//! the front is exact. Removal asserts this; breaking it corrupts the FIFO.

use std::collections::VecDeque;

use slab::Slab;

use crate::types::{Order, OrderStatus, Side};

// ============================================================================
// MatchResult enum
// ============================================================================

/// Outcome of matching an incoming order against one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Prices do not cross; no mutation occurred. Since levels are visited
    /// best-to-worst, no further level can match either.
    CannotMatch,
    /// The level was exhausted but the incoming order still has quantity
    /// left; the caller should continue to the next-best level.
    Continuation,
    /// The incoming order was fully filled.
    Complete,
}

// ============================================================================
// PriceLevel struct
// ============================================================================

/// All orders resting at a single price, on one side of the book.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Side shared by every order in the queue
    pub side: Side,

    /// Total remaining quantity at this level. Informational aggregate,
    /// not consulted by the matching algorithm.
    pub total_qty: u64,

    /// FIFO queue of arena keys, oldest first (time priority)
    orders: VecDeque<usize>,
}

impl PriceLevel {
    /// Create a new empty price level.
    ///
    /// The book seeds a fresh level with its first order immediately via
    /// [`push_back`](Self::push_back).
    pub fn new(price: u64, side: Side) -> Self {
        Self {
            price,
            side,
            total_qty: 0,
            orders: VecDeque::new(),
        }
    }

    /// Check if the level holds no orders (the book prunes empty levels)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders physically queued, including any not-yet-swept
    /// cancelled orders
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Append an order to the back of the queue (newest last).
    ///
    /// The caller (the book) guarantees the order shares this level's price
    /// and side by construction of its routing; a mismatch is a bug.
    pub fn push_back(&mut self, key: usize, arena: &Slab<Order>) {
        let order = arena.get(key).expect("level queued a missing order");
        debug_assert_eq!(order.price, self.price, "order price differs from level");
        debug_assert_eq!(order.side, self.side, "order side differs from level");

        self.total_qty = self.total_qty.saturating_add(order.qty_left);
        self.orders.push_back(key);
    }

    /// Check whether this level can cross with an incoming order.
    ///
    /// An incoming bid matches a level priced at or below its limit; an
    /// incoming ask matches a level priced at or above its limit. Fills
    /// then execute at the *resting* level's price, never the incoming
    /// limit: resting orders get the price they asked for or better.
    #[inline]
    pub fn can_match(&self, incoming: &Order) -> bool {
        match incoming.side {
            Side::Bid => self.price <= incoming.price,
            Side::Ask => incoming.price <= self.price,
        }
    }

    /// Match an incoming order against this level's queue, front first.
    ///
    /// Resting orders already cancelled are skipped (lazy deletion: finding
    /// and splicing them at cancel time is not worth it, so they are counted
    /// and popped here instead). Active orders fill both sides by
    /// `min(resting.qty_left, incoming.qty_left)` at the level price. A
    /// resting order that fills completely is reported through
    /// `on_resting_filled` so the book can drop it from its id index.
    ///
    /// After the scan, the counted terminal prefix is popped off the queue
    /// and its arena slots are freed. The level may end up empty; detecting
    /// and pruning that is the caller's job.
    pub fn match_order(
        &mut self,
        arena: &mut Slab<Order>,
        incoming: &mut Order,
        mut on_resting_filled: impl FnMut(u64),
    ) -> MatchResult {
        if !self.can_match(incoming) {
            return MatchResult::CannotMatch;
        }

        let mut result = MatchResult::Continuation;
        let mut remove_count = 0usize;

        for &key in self.orders.iter() {
            let resting = arena.get_mut(key).expect("level queued a missing order");

            if resting.status == OrderStatus::Cancelled {
                remove_count += 1;
                continue;
            }

            let qty_to_fill = resting.qty_left.min(incoming.qty_left);
            let resting_id = resting.id;
            let resting_status = resting.fill(qty_to_fill, self.price);
            incoming.fill(qty_to_fill, self.price);
            self.total_qty = self.total_qty.saturating_sub(qty_to_fill);

            if resting_status == OrderStatus::Filled {
                on_resting_filled(resting_id);
                remove_count += 1;
            }

            // Incoming order is filled, matching is complete.
            if incoming.status == OrderStatus::Filled {
                result = MatchResult::Complete;
                break;
            }
        }

        // Pop the matched/cancelled prefix and free the arena slots.
        for _ in 0..remove_count {
            let key = self
                .orders
                .pop_front()
                .expect("removal prefix longer than queue");
            let removed = arena.remove(key);
            assert!(
                removed.is_terminal(),
                "active order in removal prefix (FIFO corrupted)"
            );
            // A cancelled order never reached qty_left == 0; its remainder
            // leaves the aggregate now.
            self.total_qty = self.total_qty.saturating_sub(removed.qty_left);
        }

        result
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
