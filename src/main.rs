//! matchbook - Demo Binary
//!
//! Walks the public surface of the matching core: resting orders, a
//! crossing order that sweeps levels, and a lazy cancellation.

use matchbook::types::price::{from_fixed_trimmed, to_fixed};
use matchbook::{Orderbook, Side};

fn fx(s: &str) -> u64 {
    to_fixed(s).expect("literal price/qty")
}

fn main() {
    println!("===========================================");
    println!("  matchbook - limit order book demo");
    println!("===========================================");
    println!();

    let mut book = Orderbook::with_capacity(1024);

    println!("Resting asks: 4.0 @ $5, 1.0 @ $5, 0.2 @ $7.3, 0.5 @ $10.1");
    book.add_order(Side::Ask, fx("5"), fx("4")).unwrap();
    book.add_order(Side::Ask, fx("5"), fx("1")).unwrap();
    book.add_order(Side::Ask, fx("7.3"), fx("0.2")).unwrap();
    let deep_ask = book.add_order(Side::Ask, fx("10.1"), fx("0.5")).unwrap();

    println!("Resting bid:  1.0 @ $3");
    book.add_order(Side::Bid, fx("3"), fx("1")).unwrap();

    println!();
    println!("Book: best bid ${}, best ask ${}, {} bid / {} ask levels",
        from_fixed_trimmed(book.best_bid()),
        from_fixed_trimmed(book.best_ask()),
        book.bid_levels(),
        book.ask_levels(),
    );

    println!();
    println!("Incoming bid: 6.0 @ $8 (sweeps everything below $8)...");
    let whale = book.add_order(Side::Bid, fx("8"), fx("6")).unwrap();

    println!("  status:         {:?}", whale.status);
    println!("  filled:         {}", from_fixed_trimmed(whale.qty_filled));
    println!("  left (resting): {}", from_fixed_trimmed(whale.qty_left));
    println!("  avg fill price: ${}", from_fixed_trimmed(whale.avg_fill_price));

    println!();
    println!("Book: best bid ${}, best ask ${}",
        from_fixed_trimmed(book.best_bid()),
        from_fixed_trimmed(book.best_ask()),
    );

    println!();
    println!("Cancelling the deep ask (id {})...", deep_ask.id);
    let cancelled = book.cancel_order(deep_ask.id);
    println!("  cancelled: {} (O(1); removal deferred to the next scan)", cancelled);
    println!("  open orders: {}", book.open_orders());
}
