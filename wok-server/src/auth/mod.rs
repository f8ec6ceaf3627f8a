//! Staff authentication
//!
//! JWT bearer tokens for the admin console. Customers are identified by
//! their chat-platform user id and never authenticate here.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_staff;

use serde::{Deserialize, Serialize};

/// Authenticated staff member, injected into request extensions by
/// [`require_staff`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}
