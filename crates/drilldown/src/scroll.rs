//! Deferred "scroll fully right" for the column strip.
//!
//! After a column is appended the strip has to scroll so the new column is
//! visible. The scroll can't happen synchronously because the host has not
//! laid the new column out yet, so it is posted to the UI thread's
//! [`SharedTaskScheduler`] with a short delay.
//!
//! The posted task holds only a weak handle to the [`ScrollTarget`] and a
//! liveness flag. Once the owning [`DeferredScroll`] is dropped the task
//! turns into a no-op, whether or not it already left the queue.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use drilldown_core::logging::{span_names, targets};
use drilldown_core::{PerfSpan, ScheduledTaskId, SharedTaskScheduler};

use crate::config::ColumnStackConfig;

/// A viewport that can scroll to its right edge.
pub trait ScrollTarget: Send + Sync {
    /// Scroll fully right. Calling this repeatedly has no further effect.
    fn scroll_to_end(&self);
}

/// Schedules and coalesces deferred scrolls of one target.
///
/// # Example
///
/// ```
/// use drilldown::{DeferredScroll, ScrollTarget};
/// use drilldown_core::SharedTaskScheduler;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::{Duration, Instant};
///
/// #[derive(Default)]
/// struct Viewport {
///     scrolls: AtomicUsize,
/// }
///
/// impl ScrollTarget for Viewport {
///     fn scroll_to_end(&self) {
///         self.scrolls.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let scheduler = Arc::new(SharedTaskScheduler::new());
/// let viewport = Arc::new(Viewport::default());
/// let mut scroll = DeferredScroll::new(scheduler.clone(), &viewport, Duration::from_millis(100));
///
/// scroll.request();
/// scroll.request();
///
/// scheduler.process_ready_at(Instant::now() + Duration::from_millis(200));
/// assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);
/// ```
pub struct DeferredScroll {
    scheduler: Arc<SharedTaskScheduler>,
    target: Weak<dyn ScrollTarget>,
    alive: Arc<AtomicBool>,
    delay: Duration,
    coalesce: bool,
    pending: Option<ScheduledTaskId>,
}

impl DeferredScroll {
    /// Create a deferred scroll of `target` that waits `delay` after each request.
    pub fn new<T>(scheduler: Arc<SharedTaskScheduler>, target: &Arc<T>, delay: Duration) -> Self
    where
        T: ScrollTarget + 'static,
    {
        let target: Weak<T> = Arc::downgrade(target);
        let target: Weak<dyn ScrollTarget> = target;
        Self {
            scheduler,
            target,
            alive: Arc::new(AtomicBool::new(true)),
            delay,
            coalesce: true,
            pending: None,
        }
    }

    /// Create a deferred scroll using the delay and coalescing policy of `config`.
    pub fn from_config<T>(
        scheduler: Arc<SharedTaskScheduler>,
        target: &Arc<T>,
        config: &ColumnStackConfig,
    ) -> Self
    where
        T: ScrollTarget + 'static,
    {
        let mut scroll = Self::new(scheduler, target, config.scroll_delay());
        scroll.coalesce = config.coalesce_scroll_requests;
        scroll
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn coalesces(&self) -> bool {
        self.coalesce
    }

    /// Whether a scroll is waiting in the scheduler.
    pub fn is_pending(&self) -> bool {
        self.pending
            .is_some_and(|id| self.scheduler.is_active(id))
    }

    /// Schedule a scroll to the right edge after the configured delay.
    ///
    /// With coalescing enabled, a request made while a scroll is still pending
    /// is folded into it. The pending scroll keeps its original deadline.
    #[tracing::instrument(skip(self), target = "drilldown::scroll", level = "trace")]
    pub fn request(&mut self) {
        if self.coalesce {
            if let Some(id) = self.pending.filter(|&id| self.scheduler.is_active(id)) {
                tracing::trace!(target: targets::SCROLL, ?id, "scroll request coalesced");
                return;
            }
        }

        let target = self.target.clone();
        let alive = self.alive.clone();
        let id = self.scheduler.schedule_once(self.delay, move || {
            if !alive.load(Ordering::Acquire) {
                tracing::trace!(target: targets::SCROLL, "owner gone, skipping scroll");
                return;
            }
            match target.upgrade() {
                Some(target) => {
                    let _perf = PerfSpan::new(span_names::SCROLL);
                    target.scroll_to_end();
                }
                None => tracing::trace!(target: targets::SCROLL, "scroll target dropped"),
            }
        });

        tracing::debug!(target: targets::SCROLL, ?id, delay = ?self.delay, "scroll scheduled");
        self.pending = Some(id);
    }

    /// Cancel the pending scroll, if any.
    ///
    /// Returns true if a scroll was still waiting and has been cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(id) => self.scheduler.cancel(id).is_ok(),
            None => false,
        }
    }
}

impl Drop for DeferredScroll {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        self.cancel();
    }
}

impl fmt::Debug for DeferredScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredScroll")
            .field("delay", &self.delay)
            .field("coalesce", &self.coalesce)
            .field("pending", &self.pending)
            .field("target_alive", &(self.target.strong_count() > 0))
            .finish()
    }
}

static_assertions::assert_impl_all!(DeferredScroll: Send, Sync);
