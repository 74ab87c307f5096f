//! Rollback-unless-committed transaction scope.

use std::ops::Deref;

use jammdb::Tx;

/// Owns a live transaction. Dropping it without a successful
/// [`Scope::commit`] rolls the transaction back.
pub(crate) struct Scope<'db> {
    // Dropped before `rollback`, so the log line follows the discard.
    tx: Tx<'db>,
    rollback: Rollback,
}

/// Logs the rollback of a write transaction unless disarmed.
struct Rollback {
    abort: bool,
    writable: bool,
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if self.abort && self.writable {
            tracing::debug!("rolled back uncommitted write transaction");
        }
    }
}

impl<'db> Scope<'db> {
    pub(crate) fn new(tx: Tx<'db>, writable: bool) -> Self {
        Scope {
            tx,
            rollback: Rollback {
                abort: true,
                writable,
            },
        }
    }

    /// Commits the transaction. On failure nothing was committed and the
    /// store has already discarded the transaction.
    pub(crate) fn commit(self) -> Result<(), jammdb::Error> {
        let Scope { tx, mut rollback } = self;
        // Dropping an uncommitted jammdb transaction discards it, and a
        // failed commit has consumed it either way.
        tx.commit()?;
        rollback.abort = false;
        Ok(())
    }
}

impl<'db> Deref for Scope<'db> {
    type Target = Tx<'db>;
    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}
