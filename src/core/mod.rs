//! The `core` module contains the small building blocks the [`crate::Client`]
//! is assembled from.
//!
//! [`bucket`] resolves nested bucket paths and [`txn`] holds the
//! rollback-unless-committed transaction scope.
pub mod bucket;
pub mod clock;
pub mod config;
pub mod encoding;
pub(crate) mod txn;
