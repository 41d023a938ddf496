//! User domain types.

use chrono::{DateTime, Utc};

use listmate_core::{Email, UserId};

/// An account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email address.
    pub email: Email,
    /// Staff bypass list membership checks.
    pub is_staff: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
