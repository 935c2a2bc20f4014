// ============================================================================
// SCHEDULER - Cancellable one-shot timers
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task. Dropping it cancels the task.
#[must_use = "dropping the handle cancels the task"]
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask;
}

struct PendingTask {
    id: u64,
    due_ms: u64,
    task: Task,
}

/// Virtual clock for native targets and tests; time only moves on `advance`
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_id: Cell<u64>,
    pending: Rc<RefCell<Vec<PendingTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward and run every task that came due, in due order
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i);
                due.map(|i| pending.remove(i))
            };
            match next {
                Some(task) => {
                    self.now_ms.set(task.due_ms);
                    (task.task)();
                }
                None => break,
            }
        }
        self.now_ms.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.pending.borrow_mut().push(PendingTask {
            id,
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            task,
        });

        let pending: Weak<RefCell<Vec<PendingTask>>> = Rc::downgrade(&self.pending);
        ScheduledTask::new(move || {
            if let Some(pending) = pending.upgrade() {
                pending.borrow_mut().retain(|t| t.id != id);
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_timers::callback::Timeout;

    use super::{ScheduledTask, Scheduler, Task};

    /// `setTimeout` through gloo; dropping the `Timeout` clears it
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TimeoutScheduler;

    impl Scheduler for TimeoutScheduler {
        fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask {
            let timeout = Timeout::new(delay_ms, task);
            ScheduledTask::new(move || drop(timeout))
        }
    }
}
