//! A value that is loaded at most once, including failed loads.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;


#[derive(Debug)]
enum State<T> {
    NotLoaded,
    Loaded(Arc<T>),
    Failed,
}

/// Lazily loads a value and remembers the result, success or failure.
///
/// The lock is held while loading, so concurrent callers wait for the first
/// load instead of starting their own.
pub(crate) struct LoadOnce<T> {
    state: Mutex<State<T>>,
}

impl<T> LoadOnce<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State::NotLoaded),
        }
    }

    /// Returns the loaded value, loading it with `load` if no attempt was
    /// made yet. Returns `None` if this or an earlier attempt failed.
    pub(crate) fn get_or_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Option<Arc<T>>
    where
        E: fmt::Display,
    {
        let mut state = self.state.lock();
        match &*state {
            State::Loaded(value) => return Some(value.clone()),
            State::Failed => return None,
            State::NotLoaded => {}
        }

        match load() {
            Ok(value) => {
                let value = Arc::new(value);
                *state = State::Loaded(value.clone());
                Some(value)
            }
            Err(e) => {
                log::warn!("{} (will not retry)", e);
                *state = State::Failed;
                None
            }
        }
    }

    /// Returns the value if it was loaded successfully before. Never loads.
    pub(crate) fn get(&self) -> Option<Arc<T>> {
        match &*self.state.lock() {
            State::Loaded(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub(crate) fn has_failed(&self) -> bool {
        match &*self.state.lock() {
            State::Failed => true,
            _ => false,
        }
    }

    /// Forgets the loaded value or failure.
    pub(crate) fn reset(&mut self) {
        *self.state.get_mut() = State::NotLoaded;
    }
}

impl<T> Default for LoadOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones start out unloaded; the loaded value is never shared with the
/// clone.
impl<T> Clone for LoadOnce<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LoadOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = match &*self.state.lock() {
            State::NotLoaded => "not loaded",
            State::Loaded(_) => "loaded",
            State::Failed => "failed",
        };
        f.debug_struct("LoadOnce").field("state", &state).finish()
    }
}
