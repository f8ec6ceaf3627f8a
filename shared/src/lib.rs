//! Shared types for the Wok ordering system
//!
//! Domain models and pure business logic used by both the server and
//! any Rust clients: menu/option models, cart aggregation and pricing,
//! the order lifecycle, and sync message payloads. No I/O lives here.

pub mod cart;
pub mod message;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartError, CartLine, ItemSnapshot};
pub use message::SyncEvent;
pub use order::{Order, OrderStatus, TransitionError};
