//! Cooperative one-shot task scheduler.
//!
//! The scheduler defers closures to a point in time. Nothing runs on its own:
//! the host calls [`SharedTaskScheduler::process_ready`] from its main update
//! loop and every task whose time has come runs to completion on that thread.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use window_helper_core::SharedTaskScheduler;
//!
//! let scheduler = SharedTaskScheduler::new();
//! let start = Instant::now();
//!
//! let id = scheduler.schedule_once(Duration::from_secs(3), || {
//!     println!("re-applied");
//! });
//!
//! // Nothing is due yet.
//! assert_eq!(scheduler.process_ready_at(start), 0);
//!
//! // A superseded task can be cancelled before it fires.
//! scheduler.cancel(id).unwrap();
//! assert_eq!(scheduler.process_ready_at(start + Duration::from_secs(5)), 0);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SchedulerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
type BoxedScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct SchedulerQueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
}

impl PartialEq for SchedulerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time
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
        other.run_time.cmp(&self.run_time)
    }
}

/// Manages deferred one-shot tasks.
///
/// Tasks are kept in a priority queue ordered by their execution time.
/// Cancelling a task removes it from the registry; its queue entry is
/// skipped lazily.
pub struct TaskScheduler {
    /// All pending tasks.
    tasks: SlotMap<ScheduledTaskId, BoxedScheduledTask>,
    /// Priority queue of pending executions (min-heap by run time).
    queue: BinaryHeap<SchedulerQueueEntry>,
}

impl TaskScheduler {
    /// Create a new task scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a task to execute once after the specified delay.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_at(Instant::now() + delay, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// If the instant is in the past, the task executes on the next
    /// processing cycle.
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tasks.insert(Box::new(task));
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: instant,
        });

        tracing::trace!(target: targets::SCHEDULER, ?id, "task scheduled");
        id
    }

    /// Cancel and remove a scheduled task.
    ///
    /// Returns an error if the task already ran, was already cancelled, or
    /// never existed.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        if self.tasks.remove(id).is_some() {
            tracing::trace!(target: targets::SCHEDULER, ?id, "task cancelled");
            Ok(())
        } else {
            Err(SchedulerError::InvalidTaskId.into())
        }
    }

    /// Check if a scheduled task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Drop queue entries whose task no longer exists.
    fn prune_front(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.tasks.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }

    /// Get the duration until the next task should execute, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.prune_front();
        let now = Instant::now();
        self.queue
            .peek()
            .map(|entry| entry.run_time.saturating_duration_since(now))
    }

    /// Check if there are any tasks ready to execute at `now`.
    pub fn has_ready_at(&mut self, now: Instant) -> bool {
        self.prune_front();
        self.queue.peek().is_some_and(|entry| entry.run_time <= now)
    }

    /// Remove every task due at `now`, in execution order.
    ///
    /// The tasks are returned rather than run so callers can release any lock
    /// guarding the scheduler first.
    fn take_ready(&mut self, now: Instant) -> Vec<(ScheduledTaskId, BoxedScheduledTask)> {
        let mut ready = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.run_time > now {
                break;
            }
            self.queue.pop();

            // Cancelled tasks leave their queue entry behind.
            if let Some(task) = self.tasks.remove(entry.id) {
                ready.push((entry.id, task));
            }
        }

        ready
    }

    /// Run all tasks due at `now`.
    ///
    /// Returns the number of tasks that were executed.
    #[tracing::instrument(skip(self), target = "window_helper_core::scheduler", level = "trace")]
    pub fn process_ready_at(&mut self, now: Instant) -> usize {
        let ready = self.take_ready(now);
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }

    /// Run all tasks that are due now.
    pub fn process_ready(&mut self) -> usize {
        self.process_ready_at(Instant::now())
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`TaskScheduler`].
///
/// Due tasks are taken out under the lock and run after it is released, so a
/// running task may schedule or cancel other tasks.
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
}

impl SharedTaskScheduler {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
        }
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
        self.inner.lock().has_ready_at(Instant::now())
    }

    /// Run all tasks due at `now`. See [`TaskScheduler::process_ready_at`].
    pub fn process_ready_at(&self, now: Instant) -> usize {
        let ready = self.inner.lock().take_ready(now);
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }

    pub fn process_ready(&self) -> usize {
        self.process_ready_at(Instant::now())
    }
}

impl Default for SharedTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
