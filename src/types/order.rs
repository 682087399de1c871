//! Order types for the matchbook matching core.
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (SCALE constant).
//! This provides 8 decimal places of precision without floating-point errors.
//! The one exception is `avg_fill_price`, a true quotient that may carry
//! integer rounding. This is an accepted, documented approximation.
//!
//! ## Lifecycle
//!
//! Orders are created by [`Orderbook::add_order`](crate::Orderbook::add_order),
//! mutated only by [`Order::fill`] (driven by level matching) or
//! [`Order::cancel`], and dropped from all indexes once terminal.

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    #[default]
    Bid,
    /// Sell order (ask) - wants to sell the asset
    Ask,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Order lifecycle status.
///
/// Transitions: `Open -> PartialFill -> Filled`, or
/// `Open | PartialFill -> Cancelled`. `Filled` and `Cancelled` are terminal;
/// no operation un-fills or un-cancels an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Resting or incoming, no fills yet
    #[default]
    Open,
    /// At least one fill applied, quantity remaining
    PartialFill,
    /// Fully filled (terminal)
    Filled,
    /// Cancelled by the owner (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if the status is terminal (no further mutation allowed)
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order and its fill state machine.
///
/// ## Fields
///
/// All price/quantity fields use fixed-point representation (scaled by 10^8).
/// `total_cost` accumulates price*qty products, which are scaled by 10^16,
/// so it is widened to u128.
///
/// ## Invariant
///
/// `qty == qty_left + qty_filled` holds after every operation.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, OrderStatus, Side};
///
/// // Bid for 10.00000000 units at 4.00000000
/// let order = Order::new(1, Side::Bid, 400_000_000, 1_000_000_000, 0);
/// assert_eq!(order.status, OrderStatus::Open);
/// assert_eq!(order.qty_left, order.qty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique order identifier (assigned by the book)
    pub id: u64,

    /// Order side
    pub side: Side,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Original quantity in fixed-point (scaled by 10^8)
    pub qty: u64,

    /// Remaining unfilled quantity
    pub qty_left: u64,

    /// Cumulative filled quantity
    pub qty_filled: u64,

    /// Lifecycle status
    pub status: OrderStatus,

    /// Cumulative price*qty paid/received across fills (scaled by 10^16)
    pub total_cost: u128,

    /// Volume-weighted fill price: total_cost / qty_filled (scaled by 10^8).
    /// 0 until the first fill; integer quotient, so may round down.
    pub avg_fill_price: u64,

    /// Creation time in milliseconds. Informational only: time priority
    /// is determined by queue position, never by this field.
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order.
    ///
    /// Positivity of `price` and `qty` is validated at the
    /// [`Orderbook::add_order`](crate::Orderbook::add_order) boundary before
    /// construction; this constructor does not re-validate.
    pub fn new(id: u64, side: Side, price: u64, qty: u64, timestamp: u64) -> Self {
        Self {
            id,
            side,
            price,
            qty,
            qty_left: qty,
            qty_filled: 0,
            status: OrderStatus::Open,
            total_cost: 0,
            avg_fill_price: 0,
            timestamp,
        }
    }

    /// Check if the order is in a terminal state
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a fill of `qty` units at `price`.
    ///
    /// `price` is the resting level's price, not this order's limit price:
    /// resting orders get the price they asked for or better.
    ///
    /// The caller (level matching) guarantees `0 < qty <= qty_left`;
    /// an overfill is a bug in the matching algorithm, not a recoverable
    /// condition.
    ///
    /// # Returns
    ///
    /// The new status: `Filled` if nothing remains, else `PartialFill`.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::types::{Order, OrderStatus, Side};
    ///
    /// let mut order = Order::new(1, Side::Bid, 200_000_000, 1_000, 0);
    /// let status = order.fill(400, 190_000_000);
    /// assert_eq!(status, OrderStatus::PartialFill);
    /// assert_eq!(order.qty_left, 600);
    /// assert_eq!(order.avg_fill_price, 190_000_000);
    /// ```
    pub fn fill(&mut self, qty: u64, price: u64) -> OrderStatus {
        debug_assert!(qty > 0, "zero-quantity fill");
        debug_assert!(qty <= self.qty_left, "fill exceeds remaining quantity");
        debug_assert!(!self.is_terminal(), "fill on terminal order");

        self.total_cost += qty as u128 * price as u128;
        self.qty_left -= qty;
        self.qty_filled += qty;
        // total_cost is scaled by 10^16 and qty_filled by 10^8, so the
        // quotient lands back on the 10^8 price scale.
        self.avg_fill_price = (self.total_cost / self.qty_filled as u128) as u64;

        self.status = if self.qty_left == 0 {
            OrderStatus::Filled
        } else {
            OrderStatus::PartialFill
        };
        self.status
    }

    /// Mark the order cancelled.
    ///
    /// Only reachable through the book's id index, which never holds
    /// terminal orders.
    pub fn cancel(&mut self) {
        debug_assert!(!self.is_terminal(), "cancel on terminal order");
        self.status = OrderStatus::Cancelled;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::price::to_fixed;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!OrderStatus::Open.is_terminal());
        assert!(!OrderStatus::PartialFill.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(1, Side::Bid, to_fixed("2").unwrap(), 1000, 7);

        assert_eq!(order.id, 1);
        assert_eq!(order.side, Side::Bid);
        assert_eq!(order.price, 200_000_000);
        assert_eq!(order.qty, 1000);
        assert_eq!(order.qty_left, 1000);
        assert_eq!(order.qty_filled, 0);
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.total_cost, 0);
        assert_eq!(order.avg_fill_price, 0);
        assert_eq!(order.timestamp, 7);
    }

    #[test]
    fn test_order_fill_lifecycle() {
        // Bid 1000 lots at $2 per unit.
        let mut order = Order::new(1, Side::Bid, to_fixed("2").unwrap(), 1000, 0);

        // Fill 500 lots at $1.9 per unit.
        let status = order.fill(500, to_fixed("1.9").unwrap());
        assert_eq!(status, OrderStatus::PartialFill);
        assert_eq!(order.qty_left, 500);
        assert_eq!(order.qty_filled, 500);
        assert_eq!(order.avg_fill_price, to_fixed("1.9").unwrap());

        // Fill the rest at $2.
        let status = order.fill(500, to_fixed("2").unwrap());
        assert_eq!(status, OrderStatus::Filled);
        assert_eq!(order.qty_left, 0);
        assert_eq!(order.qty_filled, 1000);
        assert!(order.is_terminal());
    }

    #[test]
    fn test_order_conservation() {
        let mut order = Order::new(1, Side::Ask, to_fixed("5").unwrap(), 900, 0);

        for fill in [100u64, 350, 250, 200] {
            order.fill(fill, to_fixed("5").unwrap());
            assert_eq!(order.qty, order.qty_left + order.qty_filled);
        }
        assert_eq!(order.status, OrderStatus::Filled);
    }

    #[test]
    fn test_order_avg_fill_price_weighted() {
        let mut order = Order::new(1, Side::Bid, to_fixed("10").unwrap(), 300, 0);

        // 100 @ $4 + 200 @ $7 -> avg = (400 + 1400) / 300 = $6
        order.fill(100, to_fixed("4").unwrap());
        order.fill(200, to_fixed("7").unwrap());

        assert_eq!(order.avg_fill_price, to_fixed("6").unwrap());
        assert_eq!(
            order.total_cost,
            100u128 * to_fixed("4").unwrap() as u128 + 200u128 * to_fixed("7").unwrap() as u128
        );
    }

    #[test]
    fn test_order_cancel() {
        let mut order = Order::new(1, Side::Bid, to_fixed("2").unwrap(), 1000, 0);

        order.fill(400, to_fixed("2").unwrap());
        order.cancel();

        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.is_terminal());
        // Fill accounting is untouched by cancellation.
        assert_eq!(order.qty_left, 600);
        assert_eq!(order.qty_filled, 400);
    }

    #[test]
    #[should_panic(expected = "fill exceeds remaining quantity")]
    #[cfg(debug_assertions)]
    fn test_order_overfill_is_a_fault() {
        let mut order = Order::new(1, Side::Bid, to_fixed("2").unwrap(), 100, 0);
        order.fill(101, to_fixed("2").unwrap());
    }
}
