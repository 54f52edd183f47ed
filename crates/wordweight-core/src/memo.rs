//! Build-once, read-many caching of expensive values
//!
//! A [`Memo`] owns the function that produces its value and runs it on the
//! first [`get`](Memo::get). Later calls share the same `Arc`. A failed build is
//! not cached, so the next `get` tries again.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type Builder<T, E> = Box<dyn Fn() -> std::result::Result<T, E> + Send + Sync>;

/// A lazily built, shared value
pub struct Memo<T, E = crate::CoreError> {
    build: Builder<T, E>,
    value: Mutex<Option<Arc<T>>>,
}

impl<T, E> Memo<T, E> {
    /// Create a memo around `build`; nothing runs until the first `get`
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
            value: Mutex::new(None),
        }
    }

    /// Get the value, building it on first use
    ///
    /// Concurrent callers wait for a single build.
    pub fn get(&self) -> std::result::Result<Arc<T>, E> {
        let mut slot = self.value.lock();
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new((self.build)()?);
        *slot = Some(Arc::clone(&value));
        tracing::debug!("Memoized value built");
        Ok(value)
    }

    /// Check whether the value has been built
    pub fn is_built(&self) -> bool {
        self.value.lock().is_some()
    }
}

impl<T, E> fmt::Debug for Memo<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("built", &self.is_built())
            .finish()
    }
}
