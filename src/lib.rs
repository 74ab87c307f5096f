//! # boltwrap
//!
//! Lifecycle and transaction helpers around [`jammdb`], an embedded
//! single-file key-value store with nested buckets.
//!
//! A [`Client`] owns the store handle. Transactions are run through
//! callbacks and are rolled back unless the callback succeeds and the commit
//! goes through.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use boltwrap::{Client, Config, Result, find_bucket_in, integer_to_bytes};
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut client = Client::new(Config {
//!     dir: "/path/to/a/db/dir".into(),
//!     ..Config::new()
//! });
//! let path = client.open()?;
//! println!("store at {path:?}");
//!
//! // Create top-level buckets once at startup.
//! client.init_entity(|tx| -> Result<()> {
//!     tx.get_or_create_bucket("users")?;
//!     Ok(())
//! })?;
//!
//! // Writes are committed only if the callback returns Ok.
//! client.write_transaction(|tx| -> Result<()> {
//!     let users = tx.get_bucket("users")?;
//!     let sessions = users.get_or_create_bucket("sessions")?;
//!     sessions.put(integer_to_bytes(7).to_vec(), "token")?;
//!     Ok(())
//! })?;
//!
//! // Reads see a consistent snapshot.
//! let found = client.read_transaction(|tx| -> Result<bool> {
//!     Ok(find_bucket_in(tx, &["users", "sessions"]).is_ok())
//! })?;
//! assert!(found);
//!
//! client.delete_with_transaction("users", "unused-key")?;
//! client.close()?;
//! # Ok(())
//! # }
//! ```
mod api;
mod core;

pub use api::*;
pub use jammdb;
pub use crate::core::{bucket, clock, config, encoding};
