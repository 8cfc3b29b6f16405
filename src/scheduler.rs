// Deferred execution: "after this many milliseconds, run this closure"
//
// The sequencer never sleeps or blocks; every delay goes through this trait
// so tests can drive the whole animation with a manual clock and the browser
// build maps onto window.setTimeout.

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// One-shot timer abstraction
pub trait Scheduler {
    /// Run `callback` once, `delay_ms` milliseconds from now.
    ///
    /// Callbacks must tolerate firing after the widget that scheduled them
    /// was removed; cancellation is cooperative, not provided here.
    fn schedule_ms(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

struct PendingTask {
    fire_at: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

impl PartialEq for PendingTask {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}
impl Eq for PendingTask {}
impl PartialOrd for PendingTask {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PendingTask {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.fire_at, self.seq).cmp(&(other.fire_at, other.seq))
    }
}

#[derive(Default)]
struct ManualQueue {
    now_ms: u64,
    next_seq: u64,
    tasks: BinaryHeap<Reverse<PendingTask>>,
}

/// Deterministic scheduler driven by explicit clock advancement.
///
/// Callbacks fire in (time, insertion) order when the clock is advanced past
/// their deadline; callbacks scheduled while firing are honored within the
/// same advancement if they fall inside it. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> ManualScheduler {
        ManualScheduler::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Advance the clock to an absolute time, firing everything due
    pub fn advance_to(&self, deadline_ms: u64) {
        loop {
            let task = {
                let mut queue = self.queue.borrow_mut();
                match queue.tasks.peek() {
                    Some(Reverse(task)) if task.fire_at <= deadline_ms => {
                        let Reverse(task) = queue.tasks.pop().unwrap();
                        queue.now_ms = queue.now_ms.max(task.fire_at);
                        task
                    }
                    _ => {
                        queue.now_ms = queue.now_ms.max(deadline_ms);
                        return;
                    }
                }
            };
            // Borrow released: the callback may schedule more tasks
            (task.callback)();
        }
    }

    /// Advance the clock by a relative amount
    pub fn advance_by(&self, delta_ms: u64) {
        let deadline = self.now_ms() + delta_ms;
        self.advance_to(deadline);
    }

    /// Fire every pending task regardless of deadline
    pub fn run_all(&self) {
        let deadline = {
            let queue = self.queue.borrow();
            queue
                .tasks
                .iter()
                .map(|Reverse(t)| t.fire_at)
                .max()
                .unwrap_or(queue.now_ms)
        };
        self.advance_to(deadline);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_ms(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let mut queue = self.queue.borrow_mut();
        let fire_at = queue.now_ms + u64::from(delay_ms);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.push(Reverse(PendingTask {
            fire_at,
            seq,
            callback,
        }));
    }
}

/// Browser scheduler backed by `window.setTimeout`
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
impl TimeoutScheduler {
    pub fn new() -> TimeoutScheduler {
        TimeoutScheduler
    }
}

#[cfg(target_arch = "wasm32")]
impl Scheduler for TimeoutScheduler {
    fn schedule_ms(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::once(callback);
        let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        if scheduled.is_ok() {
            // The browser owns the callback now; leak the closure so it stays
            // valid until the timer fires.
            cb.forget();
        }
    }
}
