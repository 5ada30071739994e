//! Document scroll lock
//!
//! The one process-wide switch: while held, the document body carries the
//! `overflow-hidden` class and cannot scroll. At most one owner holds it at
//! a time, and dropping the guard always releases it.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use atile_core::prelude::*;

/// Body class asserted while the lock is held
pub const BODY_LOCK_CLASS: &str = "overflow-hidden";

/// Shared handle to the document scroll lock
#[derive(Clone, Default)]
pub struct ScrollLock {
    owner: Arc<Mutex<Option<String>>>,
}

impl fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("owner", &self.owner())
            .finish()
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the lock for `owner`.
    ///
    /// Fails with [`Error::ScrollLockHeld`] while another guard is alive.
    pub fn try_acquire(&self, owner: impl Into<String>) -> Result<ScrollLockGuard> {
        let owner = owner.into();
        let mut slot = self.slot();
        if let Some(current) = slot.as_ref() {
            return Err(Error::scroll_lock_held(current.clone()));
        }
        *slot = Some(owner.clone());
        debug!("Scroll locked by {}", owner);
        Ok(ScrollLockGuard {
            lock: self.clone(),
            owner,
        })
    }

    pub fn is_locked(&self) -> bool {
        self.slot().is_some()
    }

    pub fn owner(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Class the body should carry right now
    pub fn body_class(&self) -> Option<&'static str> {
        self.is_locked().then_some(BODY_LOCK_CLASS)
    }
}

/// Proof of ownership of the scroll lock; releases it on drop
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    lock: ScrollLock,
    owner: String,
}

impl ScrollLockGuard {
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("owner", &self.owner)
            .finish()
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        *self.lock.slot() = None;
        debug!("Scroll unlocked by {}", self.owner);
    }
}
