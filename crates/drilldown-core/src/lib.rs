//! Core systems for drilldown.
//!
//! This crate provides the UI-thread plumbing the column navigation
//! controller runs on:
//!
//! - **Scheduler**: deferred one-shot tasks, drained explicitly by the UI
//!   thread's event loop
//! - **Thread affinity**: assertions that navigation state is only mutated
//!   from the thread that owns it
//! - **Logging**: tracing targets and helpers shared by the workspace
//!
//! # Scheduler Example
//!
//! ```
//! use drilldown_core::SharedTaskScheduler;
//! use std::time::{Duration, Instant};
//!
//! let scheduler = SharedTaskScheduler::new();
//!
//! // Post a deferred task
//! let id = scheduler.schedule_once(Duration::from_millis(100), || {
//!     println!("scrolled");
//! });
//! assert!(scheduler.is_active(id));
//!
//! // The event loop drains due tasks on the UI thread
//! scheduler.process_ready_at(Instant::now() + Duration::from_millis(100));
//! assert!(!scheduler.is_active(id));
//! ```

mod error;
pub mod logging;
mod scheduler;
pub mod thread_check;

pub use error::{Result, SchedulerError};
pub use logging::PerfSpan;
pub use scheduler::{ScheduledTaskId, SharedTaskScheduler, TaskScheduler};
pub use thread_check::ThreadAffinity;
