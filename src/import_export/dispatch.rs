//! Completion contexts: where a finished operation's callback runs

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedules a callback on a designated execution context
pub trait CompletionContext: Send + Sync {
    fn dispatch(&self, task: Task);
}

/// Runs the task right away on whichever thread reported completion
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineContext;

impl CompletionContext for InlineContext {
    fn dispatch(&self, task: Task) {
        task();
    }
}

/// A main-thread style task queue.
///
/// Tasks dispatched through a [`MainQueueHandle`] only run when the owner of
/// the queue drains it, so completions always land on the owning thread.
pub struct MainQueue {
    tx: Sender<Task>,
    rx: Receiver<Task>,
}

/// Cloneable dispatcher side of a [`MainQueue`]
#[derive(Clone)]
pub struct MainQueueHandle {
    tx: Sender<Task>,
}

impl MainQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> MainQueueHandle {
        MainQueueHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run every task queued so far without blocking. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one task and run it
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(task) => {
                task();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Run tasks until `count` have run or `timeout` elapses. Returns how many ran.
    pub fn run_until(&self, count: usize, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut ran = 0;
        while ran < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.run_next(remaining) {
                break;
            }
            ran += 1;
        }
        ran
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionContext for MainQueueHandle {
    fn dispatch(&self, task: Task) {
        if self.tx.send(task).is_err() {
            log::warn!("Main queue is gone, dropping completion");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_inline_runs_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        InlineContext.dispatch(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_main_queue_defers_until_drained() {
        let queue = MainQueue::new();
        let handle = queue.handle();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let c = Arc::clone(&counter);
            handle.dispatch(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(queue.run_pending(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(queue.run_pending(), 0);
    }

    #[test]
    fn test_main_queue_runs_on_owner_thread() {
        let queue = MainQueue::new();
        let handle = queue.handle();
        let owner = thread::current().id();
        let ran_on = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&ran_on);
        thread::spawn(move || {
            handle.dispatch(Box::new(move || {
                *slot.lock().unwrap() = Some(thread::current().id());
            }));
        })
        .join()
        .unwrap();

        assert!(queue.run_next(Duration::from_secs(5)));
        assert_eq!(*ran_on.lock().unwrap(), Some(owner));
    }

    #[test]
    fn test_run_until_times_out() {
        let queue = MainQueue::new();
        let handle = queue.handle();
        handle.dispatch(Box::new(|| {}));

        assert_eq!(queue.run_until(2, Duration::from_millis(50)), 1);
    }
}
