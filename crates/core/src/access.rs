//! Shopping list access decision.
//!
//! A caller may act on a list (and every item in it) when they are staff or a
//! member of the list. The decision is pure; looking up membership is the
//! server's job.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// The authenticated user a request is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's user ID.
    pub id: UserId,
    /// Staff bypass membership checks.
    pub is_staff: bool,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    /// Returns `true` for [`Access::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `caller` may act on a list.
///
/// `is_member` says whether the caller is in the list's membership set. It is
/// not consulted for staff, so callers can skip the membership lookup entirely
/// when [`Caller::is_staff`] is set.
#[must_use]
pub const fn decide(caller: &Caller, is_member: bool) -> Access {
    if caller.is_staff || is_member {
        Access::Allow
    } else {
        Access::Deny
    }
}
