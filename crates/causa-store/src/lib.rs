//! # causa-store
//!
//! SQLite persistence for the Causa marketplace. The crate exposes a
//! synchronous [`Database`] handle that wraps a `rusqlite::Connection`
//! and provides typed CRUD helpers for every collection: `profiles`,
//! `cases` (with unlock membership and attachments), `messages`,
//! `notifications`, and `sessions`.
//!
//! Migrations run on every open, guarded by the `user_version` pragma.

pub mod cases;
pub mod database;
pub mod messages;
pub mod migrations;
pub mod notifications;
pub mod profiles;
pub mod sessions;

mod error;
mod util;

#[cfg(test)]
mod testutil;

pub use database::Database;
pub use error::StoreError;
