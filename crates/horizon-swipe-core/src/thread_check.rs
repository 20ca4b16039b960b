//! Thread affinity checks.
//!
//! Swipe state is owned by the UI context. Mutating it from another thread
//! is a contract violation the component cannot recover from, so objects
//! record the thread they were created on and assert it on mutation.
//!
//! ```
//! use horizon_swipe_core::thread_check::ThreadAffinity;
//!
//! struct Row {
//!     affinity: ThreadAffinity,
//!     offset: f32,
//! }
//!
//! impl Row {
//!     fn set_offset(&mut self, offset: f32) {
//!         self.affinity.debug_assert_same_thread();
//!         self.offset = offset;
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

/// Flag to enable/disable runtime thread checks globally.
static THREAD_CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Enable or disable runtime thread checks.
///
/// Enabled by default in debug builds only.
pub fn set_thread_checks_enabled(enabled: bool) {
    THREAD_CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Check if runtime thread checks are currently enabled.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    THREAD_CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// Records the thread an object was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread while checks are enabled.
    #[inline]
    pub fn assert_same_thread(&self) {
        if are_thread_checks_enabled() && !self.is_same_thread() {
            panic_wrong_thread(self.thread_id);
        }
    }

    /// Debug-only variant of [`assert_same_thread`](Self::assert_same_thread).
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}

#[cold]
#[inline(never)]
fn panic_wrong_thread(owner: ThreadId) -> ! {
    let current = std::thread::current();
    panic!(
        "swipe state accessed from thread \"{}\" ({:?}) but is owned by {:?}; \
         gesture, animation and button handling must stay on the UI thread",
        current.name().unwrap_or("<unnamed>"),
        current.id(),
        owner
    )
}
