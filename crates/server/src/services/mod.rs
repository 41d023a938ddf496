//! Business logic services.
//!
//! - `auth` - Account registration and password login
//! - `access` - Membership/staff gate in front of every list-scoped endpoint

pub mod access;
pub mod auth;

pub use access::authorize_list;
pub use auth::{AuthError, AuthService};
