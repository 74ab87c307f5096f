pub mod error;

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, SystemTime},
};

use jammdb::{DB, Tx};

use crate::core::txn::Scope;
pub use crate::core::{
    bucket::{Container, find_bucket, find_bucket_in},
    clock::{Clock, SystemClock},
    config::{Config, DEFAULT_DIR, DEFAULT_FILENAME},
    encoding::{INTEGER_KEY_SIZE, integer_from_bytes, integer_to_bytes},
};
pub use error::{Error, OpenError, Stage};

pub type Result<T> = std::result::Result<T, Error>;

/// How long [`Client::open`] waits for another holder of the store's file
/// lock before giving up.
pub const OPEN_TIMEOUT: Duration = Duration::from_secs(1);

/// Mode for directories created by [`Client::open`], before the umask.
#[cfg(unix)]
const DIR_MODE: u32 = 0o777;

/// Owns the handle to an embedded store and runs transactions against it.
///
/// A new client holds no handle; [`Client::open`] acquires one and
/// [`Client::close`] releases it. Transactions on a client that isn't open
/// fail with [`Error::NotOpen`].
pub struct Client<C: Clock = SystemClock> {
    config: Config,
    db: Option<DB>,
    clock: C,
    opened_at: Option<SystemTime>,
}

impl Client {
    /// Creates a client that reads time from the wall clock.
    pub fn new(config: Config) -> Self {
        Client::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Client<C> {
    /// Creates a client with an injected time source.
    pub fn with_clock(config: Config, clock: C) -> Self {
        Client {
            config,
            db: None,
            clock,
            opened_at: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The open store handle, if any.
    pub fn db(&self) -> Option<&DB> {
        self.db.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// The current time according to the client's clock.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }

    /// When the current handle was opened.
    pub fn opened_at(&self) -> Option<SystemTime> {
        self.opened_at
    }

    /// Creates the configured directory if needed and opens the data file in
    /// it, waiting at most [`OPEN_TIMEOUT`] for the file lock.
    ///
    /// Returns the data file's path. On failure the error carries the path
    /// that was attempted along with the unmodified cause.
    ///
    /// The open itself runs on a helper thread. After a timeout that thread
    /// stays parked on the lock, holding a file descriptor, until the other
    /// holder releases it. Retrying in a loop against a lock that is never
    /// released parks one thread per attempt.
    pub fn open(&mut self) -> std::result::Result<PathBuf, OpenError> {
        let path = self.config.path();
        // The store locks its file, so a stale handle would block our own open.
        self.release();

        if let Err(e) = create_dir(&self.config.dir) {
            return Err(OpenError {
                path,
                source: e.into(),
            });
        }
        match open_with_timeout(&path, OPEN_TIMEOUT) {
            Ok(db) => {
                self.db = Some(db);
                self.opened_at = Some(self.clock.now());
                tracing::info!(path = %path.display(), "opened store");
                Ok(path)
            }
            Err(source) => {
                if matches!(source, Error::OpenTimeout(_)) {
                    tracing::warn!(path = %path.display(), "timed out waiting for store lock");
                }
                Err(OpenError { path, source })
            }
        }
    }

    /// Releases the store handle. Does nothing if there is none, so it is
    /// safe to call repeatedly or before [`Client::open`].
    ///
    /// The store flushes on commit and unlocks its file on drop, so releasing
    /// the handle itself cannot fail.
    pub fn close(&mut self) -> Result<()> {
        self.release();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(db) = self.db.take() {
            drop(db);
            self.opened_at = None;
            tracing::debug!(path = %self.config.path().display(), "closed store");
        }
    }

    fn handle(&self) -> Result<&DB> {
        self.db.as_ref().ok_or(Error::NotOpen)
    }

    /// Runs `init` in a write transaction and commits it.
    ///
    /// Meant for idempotent setup such as creating top-level buckets.
    /// Errors from `init` are returned as-is, as are errors beginning or
    /// committing the transaction ([`Error::Store`]). Nothing is committed
    /// unless everything succeeds.
    pub fn init_entity<T, E, F>(&self, init: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let tx = self.handle()?.tx(true).map_err(Error::Store)?;
        let scope = Scope::new(tx, true);
        let value = init(&*scope)?;
        scope.commit().map_err(Error::Store)?;
        Ok(value)
    }

    /// Runs `write` in a write transaction and commits it.
    ///
    /// Errors from `write` are returned as-is. Failures to begin or commit
    /// are annotated with the stage and the caller's location
    /// ([`Error::Transaction`]). Nothing is committed unless everything
    /// succeeds.
    #[track_caller]
    pub fn write_transaction<T, E, F>(&self, write: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let scope = self.begin(true)?;
        let value = write(&*scope)?;
        commit(scope)?;
        Ok(value)
    }

    /// Runs `read` in a read-only transaction, which is released afterwards
    /// regardless of the outcome.
    #[track_caller]
    pub fn read_transaction<T, E, F>(&self, read: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let scope = self.begin(false)?;
        read(&*scope)
    }

    /// Deletes `key` from the top-level `bucket` in its own write transaction.
    ///
    /// Deleting an absent key succeeds. An absent bucket is
    /// [`Error::BucketMissing`].
    #[track_caller]
    pub fn delete_with_transaction(
        &self,
        bucket: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
    ) -> Result<()> {
        let name = bucket.as_ref();
        let scope = self.begin(true)?;
        let b = match scope.get_bucket(name.to_vec()) {
            Ok(b) => b,
            Err(jammdb::Error::BucketMissing) => {
                return Err(Error::BucketMissing {
                    bucket: String::from_utf8_lossy(name).into_owned(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        // Store errors here pass through as `Error::Store`, like the lookup.
        match b.delete(key.as_ref().to_vec()) {
            Ok(_) | Err(jammdb::Error::KeyValueMissing) => {}
            Err(e) => return Err(e.into()),
        }
        drop(b);
        commit(scope)
    }

    #[track_caller]
    fn begin(&self, writable: bool) -> Result<Scope<'_>> {
        match self.handle()?.tx(writable) {
            Ok(tx) => Ok(Scope::new(tx, writable)),
            Err(e) => Err(Error::transaction(Stage::Begin, e)),
        }
    }
}

#[track_caller]
fn commit(scope: Scope<'_>) -> Result<()> {
    match scope.commit() {
        Ok(()) => Ok(()),
        Err(e) => Err(Error::transaction(Stage::Commit, e)),
    }
}

fn create_dir(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

/// Opens the store on a helper thread so that a lock held elsewhere cannot
/// block the caller past `timeout`. A handle that arrives after the deadline
/// is dropped by the helper, releasing the lock again.
fn open_with_timeout(path: &Path, timeout: Duration) -> Result<DB> {
    let (sender, receiver) = mpsc::channel();
    let path = path.to_path_buf();
    thread::Builder::new()
        .name("store-open".to_string())
        .spawn(move || {
            let _ = sender.send(DB::open(&path));
        })?;
    match receiver.recv_timeout(timeout) {
        Ok(result) => Ok(result?),
        Err(RecvTimeoutError::Timeout) => Err(Error::OpenTimeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => {
            Err(std::io::Error::other("store open thread exited without a result").into())
        }
    }
}
