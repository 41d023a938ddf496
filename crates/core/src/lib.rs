//! Listmate Core - Shared types library.
//!
//! This crate provides common types used across all Listmate components:
//! - `server` - The shopping-list HTTP API
//! - `cli` - Command-line tools for migrations and administration
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`access`] - The list access decision (member or staff)
//! - [`validation`] - Declarative field schemas for request bodies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod types;
pub mod validation;

pub use access::{Access, Caller, decide};
pub use types::*;
pub use validation::{FieldErrors, FieldKind, FieldSpec, Fields, Schema, WriteMode};
