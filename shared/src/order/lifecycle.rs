//! Order lifecycle state machine
//!
//! `pending → cooking → served`, forward edges only. The status is never
//! applied unconditionally; every requested change is checked against the
//! edge list first, so same-state writes, skips and backward moves are
//! rejected rather than silently persisted.

use thiserror::Error;

use super::OrderStatus;

/// Attempted out-of-order status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move order from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Validate a requested transition and return the new status.
pub fn advance(current: OrderStatus, requested: OrderStatus) -> Result<OrderStatus, TransitionError> {
    use OrderStatus::*;
    match (current, requested) {
        (Pending, Cooking) | (Cooking, Served) => Ok(requested),
        (from, to) => Err(TransitionError { from, to }),
    }
}
