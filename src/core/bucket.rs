//! Resolution of nested bucket paths.
//!
//! A path such as `["users", "42", "sessions"]` names a chain of buckets,
//! each nested inside the previous one. [`find_bucket`] walks such a chain and
//! reports the first segment that does not resolve.

use jammdb::{Bucket, Tx};

/// Something that holds named child containers of its own type.
pub trait Container: Sized {
    /// Looks up the direct child named `name`. Exact match only.
    fn child(&self, name: &str) -> Option<Self>;
}

impl<'b, 'tx> Container for Bucket<'b, 'tx> {
    fn child(&self, name: &str) -> Option<Self> {
        // A plain key-value entry under this name is not a bucket.
        self.get_bucket(name.to_string()).ok()
    }
}

/// Walks `path` downward from `root`.
///
/// Returns the deepest container if every segment resolves, otherwise the
/// first segment that is missing. An empty path resolves to `root` itself.
pub fn find_bucket<'p, C, S>(root: C, path: &'p [S]) -> Result<C, &'p str>
where
    C: Container,
    S: AsRef<str>,
{
    let mut current = root;
    for part in path {
        let part = part.as_ref();
        match current.child(part) {
            Some(next) => current = next,
            None => return Err(part),
        }
    }
    Ok(current)
}

/// Like [`find_bucket`], but the first segment names a top-level bucket of
/// `tx`. An empty path names no bucket and reports `Err("")`.
pub fn find_bucket_in<'b, 'tx, 'p, S>(
    tx: &'b Tx<'tx>,
    path: &'p [S],
) -> Result<Bucket<'b, 'tx>, &'p str>
where
    S: AsRef<str>,
{
    let Some((first, rest)) = path.split_first() else {
        return Err("");
    };
    let first = first.as_ref();
    match tx.get_bucket(first.to_string()) {
        Ok(root) => find_bucket(root, rest),
        Err(_) => Err(first),
    }
}
