//! Deferred task scheduler for the UI thread.
//!
//! Tasks are one-shot closures that become due after a delay. The scheduler
//! never runs anything on its own: the owner of the UI thread drains it by
//! calling [`SharedTaskScheduler::process_ready`] from its event loop, so
//! every task executes on that thread.
//!
//! # Example
//!
//! ```
//! use drilldown_core::SharedTaskScheduler;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::{Duration, Instant};
//!
//! let scheduler = SharedTaskScheduler::new();
//! let ran = Arc::new(AtomicBool::new(false));
//!
//! let flag = ran.clone();
//! scheduler.schedule_once(Duration::from_millis(100), move || {
//!     flag.store(true, Ordering::SeqCst);
//! });
//!
//! // Nothing is due yet.
//! assert_eq!(scheduler.process_ready(), 0);
//!
//! // Pretend the delay has elapsed.
//! let later = Instant::now() + Duration::from_millis(150);
//! assert_eq!(scheduler.process_ready_at(later), 1);
//! assert!(ran.load(Ordering::SeqCst));
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SchedulerError};
use crate::logging::{PerfSpan, span_names, targets};
use crate::thread_check::ThreadAffinity;

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
type BoxedScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal scheduled task data.
struct ScheduledTaskData {
    /// When this task should execute.
    next_run: Instant,
    /// Sequence number of the queue entry that currently represents this task.
    sequence: u64,
    /// The task closure to execute.
    task: BoxedScheduledTask,
}

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct SchedulerQueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
    sequence: u64,
}

impl PartialEq for SchedulerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time && self.sequence == other.sequence
    }
}

impl Eq for SchedulerQueueEntry {}

impl PartialOrd for SchedulerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchedulerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        // Ties go to the entry that was queued first.
        other
            .run_time
            .cmp(&self.run_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages deferred one-shot tasks.
///
/// The scheduler maintains a priority queue of tasks ordered by their due
/// time. Cancelled and rescheduled tasks leave stale queue entries behind;
/// those are skipped when they reach the front of the queue.
pub struct TaskScheduler {
    /// All pending tasks.
    tasks: SlotMap<ScheduledTaskId, ScheduledTaskData>,
    /// Priority queue of pending task executions (min-heap by run time).
    queue: BinaryHeap<SchedulerQueueEntry>,
    /// Next queue sequence number.
    next_sequence: u64,
}

impl TaskScheduler {
    /// Create a new task scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    /// Schedule a task to execute after the specified delay.
    ///
    /// Returns the task ID that can be used to cancel or reschedule the task.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_at(Instant::now() + delay, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// If the instant is in the past, the task will execute on the next
    /// processing cycle.
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let sequence = self.bump_sequence();
        let id = self.tasks.insert(ScheduledTaskData {
            next_run: instant,
            sequence,
            task: Box::new(task),
        });
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: instant,
            sequence,
        });

        tracing::trace!(target: targets::SCHEDULER, ?id, "task scheduled");
        id
    }

    /// Cancel and remove a scheduled task.
    ///
    /// Returns an error if the task is unknown or has already run.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        match self.tasks.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::SCHEDULER, ?id, "task cancelled");
                Ok(())
            }
            None => Err(SchedulerError::InvalidTaskId),
        }
    }

    /// Move a pending task so that it runs `delay` from now.
    ///
    /// Returns an error if the task is unknown or has already run.
    pub fn reschedule(&mut self, id: ScheduledTaskId, delay: Duration) -> Result<()> {
        let sequence = self.bump_sequence();
        let Some(task) = self.tasks.get_mut(id) else {
            return Err(SchedulerError::InvalidTaskId);
        };

        task.next_run = Instant::now() + delay;
        task.sequence = sequence;

        // The old queue entry is skipped when it surfaces.
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: task.next_run,
            sequence,
        });

        tracing::trace!(target: targets::SCHEDULER, ?id, ?delay, "task rescheduled");
        Ok(())
    }

    /// Check if a task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    fn is_current(&self, entry: &SchedulerQueueEntry) -> bool {
        self.tasks
            .get(entry.id)
            .is_some_and(|t| t.sequence == entry.sequence)
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.is_current(entry) {
                break;
            }
            self.queue.pop();
        }
    }

    /// Get the duration until the next task is due, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue
            .peek()
            .map(|entry| entry.run_time.saturating_duration_since(Instant::now()))
    }

    /// Check if any task is due now.
    pub fn has_ready(&mut self) -> bool {
        self.discard_stale();
        self.queue
            .peek()
            .is_some_and(|entry| entry.run_time <= Instant::now())
    }

    /// Remove every task that is due at `now`, in execution order.
    fn take_ready(&mut self, now: Instant) -> Vec<(ScheduledTaskId, BoxedScheduledTask)> {
        let mut ready = Vec::new();

        while let Some(&entry) = self.queue.peek() {
            if entry.run_time > now {
                break;
            }
            self.queue.pop();

            if !self.is_current(&entry) {
                continue;
            }
            if let Some(data) = self.tasks.remove(entry.id) {
                ready.push((entry.id, data.task));
            }
        }

        ready
    }

    /// Execute all tasks that are due now.
    ///
    /// Returns the number of tasks that were executed.
    pub fn process_ready(&mut self) -> usize {
        self.process_ready_at(Instant::now())
    }

    /// Execute all tasks that are due at `now`.
    ///
    /// Returns the number of tasks that were executed.
    #[tracing::instrument(skip(self), target = "drilldown_core::scheduler", level = "trace")]
    pub fn process_ready_at(&mut self, now: Instant) -> usize {
        run_tasks(self.take_ready(now))
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn run_tasks(ready: Vec<(ScheduledTaskId, BoxedScheduledTask)>) -> usize {
    let count = ready.len();
    for (id, task) in ready {
        tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
        task();
    }
    count
}

/// A thread-safe wrapper around [`TaskScheduler`].
///
/// Any thread may schedule, cancel or reschedule tasks. Only the thread that
/// created the scheduler may process them; that thread is the UI thread the
/// tasks are marshaled onto.
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
    affinity: ThreadAffinity,
}

impl SharedTaskScheduler {
    /// Create a scheduler bound to the current thread.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
            affinity: ThreadAffinity::current(),
        }
    }

    /// The thread affinity tasks are processed with.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    pub fn schedule_once<F>(&self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().schedule_once(delay, task)
    }

    pub fn schedule_at<F>(&self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().schedule_at(instant, task)
    }

    pub fn cancel(&self, id: ScheduledTaskId) -> Result<()> {
        self.inner.lock().cancel(id)
    }

    pub fn reschedule(&self, id: ScheduledTaskId, delay: Duration) -> Result<()> {
        self.inner.lock().reschedule(id, delay)
    }

    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn has_ready(&self) -> bool {
        self.inner.lock().has_ready()
    }

    /// Execute all tasks that are due now.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the one that created the
    /// scheduler.
    pub fn process_ready(&self) -> usize {
        self.process_ready_at(Instant::now())
    }

    /// Execute all tasks that are due at `now`.
    ///
    /// The lock is released before the tasks run, so a task may schedule
    /// further work on this scheduler.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the one that created the
    /// scheduler.
    pub fn process_ready_at(&self, now: Instant) -> usize {
        self.affinity
            .assert_same_thread_with_msg("scheduled tasks must be processed on the UI thread");
        let ready = self.inner.lock().take_ready(now);
        if ready.is_empty() {
            return 0;
        }
        let _perf = PerfSpan::new(span_names::SCHEDULER);
        run_tasks(ready)
    }
}

impl Default for SharedTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedTaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTaskScheduler")
            .field("active_count", &self.active_count())
            .field("affinity", &self.affinity)
            .finish()
    }
}

// Worker threads post tasks through a shared reference.
static_assertions::assert_impl_all!(SharedTaskScheduler: Send, Sync);
