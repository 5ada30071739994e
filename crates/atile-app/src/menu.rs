//! Mobile navigation menu
//!
//! Open/closed state coupled to the document scroll lock: the lock is held
//! exactly while the menu is open and released on close, on link
//! activation, and when the menu is dropped.

use atile_core::prelude::*;
use atile_core::{current_label, ActiveNavSet};

use crate::scroll_lock::{ScrollLock, ScrollLockGuard};

const LOCK_OWNER: &str = "mobile-menu";

#[derive(Debug)]
pub struct MobileMenu {
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl MobileMenu {
    pub fn new(lock: ScrollLock) -> Self {
        Self { lock, guard: None }
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Open the menu and lock document scroll.
    ///
    /// Opening an open menu does nothing. Fails if another overlay holds
    /// the scroll lock; the menu then stays closed.
    pub fn open(&mut self) -> Result<()> {
        if self.guard.is_none() {
            self.guard = Some(self.lock.try_acquire(LOCK_OWNER)?);
        }
        Ok(())
    }

    pub fn close(&mut self) {
        self.guard = None;
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.is_open() {
            self.close();
            Ok(())
        } else {
            self.open()
        }
    }

    /// A menu link was followed: close and resolve highlighting for the new path
    pub fn navigate(&mut self, path: &str) -> ActiveNavSet {
        self.close();
        trace!("Mobile menu navigated to {}", path);
        ActiveNavSet::resolve(path)
    }

    /// Caption of the collapsed header for `path`
    pub fn caption(path: &str) -> &'static str {
        current_label(path)
    }
}
