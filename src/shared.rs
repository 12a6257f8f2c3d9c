//! Lock-protected tables for incremental updates.
//!
//! The tries themselves are build-then-freeze: once populated they can be
//! shared read-only across threads. [`Shared`] is for callers that keep
//! inserting while other threads look up.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::matcher::Matcher;

/// A table behind a reader-writer lock, cloneable across threads.
#[derive(Debug, Default)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Shared<T> {
    pub fn new(table: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Run `f` with shared access to the table.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` with exclusive access to the table.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Insert a pattern under the write lock.
    pub fn insert<V>(&self, pattern: &str, value: V) -> Result<()>
    where
        T: Matcher<V>,
    {
        self.inner.write().insert(pattern, value)
    }

    /// Look up `query` under the read lock, cloning the matched value out.
    pub fn find<V: Clone>(&self, query: &str) -> Result<Option<V>>
    where
        T: Matcher<V>,
    {
        let table = self.inner.read();
        Ok(table.lookup(query)?.cloned())
    }
}
