//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction tracing)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (propagate or generate `x-request-id`)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is not a layer: handlers opt in with [`RequireAuth`].

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::create_session_layer;
