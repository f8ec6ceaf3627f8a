//! Order submission, lifecycle and staff mutations

pub mod service;

pub use service::{LineRemoval, OrderDraftLine, OrderService, RevenueSummary};
