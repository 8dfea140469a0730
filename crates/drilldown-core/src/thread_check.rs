//! Thread affinity checks.
//!
//! Column navigation state is owned by a single UI thread. Objects that hold
//! such state record the thread they were created on with [`ThreadAffinity`]
//! and assert on every mutation that they are still being driven from it.
//! Work produced on other threads reaches the UI thread through
//! [`SharedTaskScheduler`](crate::SharedTaskScheduler).
//!
//! ```
//! use drilldown_core::thread_check::ThreadAffinity;
//!
//! struct Strip {
//!     affinity: ThreadAffinity,
//!     width: std::cell::Cell<u32>,
//! }
//!
//! impl Strip {
//!     fn new() -> Self {
//!         Self {
//!             affinity: ThreadAffinity::current(),
//!             width: std::cell::Cell::new(0),
//!         }
//!     }
//!
//!     fn set_width(&self, width: u32) {
//!         // In debug builds, panic if called from the wrong thread
//!         self.affinity.debug_assert_same_thread();
//!         self.width.set(width);
//!     }
//! }
//!
//! Strip::new().set_width(320);
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker.
///
/// Records the thread on which an object was created and verifies that
/// subsequent operations occur on the same thread.
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
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("object accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    /// Debug-only assertion with a custom message.
    #[inline]
    pub fn debug_assert_same_thread_with_msg(&self, msg: &str) {
        #[cfg(debug_assertions)]
        self.assert_same_thread_with_msg(msg);
        #[cfg(not(debug_assertions))]
        let _ = msg;
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Owner thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Column navigation state must only be touched from the UI thread\n\
            that created it. Post the operation to that thread instead:\n\
            \n\
               scheduler.schedule_once(Duration::ZERO, move || ...);\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
