//! Data models
//!
//! Shared between wok-server and frontend (via API).
//! Entities are top-level documents in the store; IDs are string record ids.

pub mod announcement;
pub mod category;
pub mod menu_item;

// Re-exports
pub use announcement::*;
pub use category::*;
pub use menu_item::*;
