//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`entry`] - QR / chat-login landing redirect
//! - [`auth`] - staff login
//! - [`menu`] - menu browsing and admin menu management
//! - [`categories`] - category listing and admin management
//! - [`orders`] - customer submission and staff workflow
//! - [`announcements`] - announcement banner and admin management
//! - [`statistics`] - revenue rollups
//! - [`sync`] - WebSocket change subscription

pub mod announcements;
pub mod auth;
pub mod categories;
pub mod entry;
pub mod health;
pub mod menu;
pub mod orders;
pub mod statistics;
pub mod sync;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
