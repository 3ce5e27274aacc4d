use crate::error::Result;
use log::{debug, warn};
use std::sync::mpsc::{channel, Sender};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single background thread that runs submitted jobs one at a time, in
/// submission order.
pub struct SerialWorker {
    name: String,
    tx: Sender<Job>,
}

impl SerialWorker {
    /// Spawn the worker thread under the given name
    pub fn spawn(name: &str) -> Result<Self> {
        let (tx, rx) = channel::<Job>();
        let thread_name = name.to_string();

        thread::Builder::new().name(thread_name.clone()).spawn(move || {
            debug!("Worker {} started", thread_name);
            // Ends once every sender is gone and the queue is drained
            while let Ok(job) = rx.recv() {
                job();
            }
            debug!("Worker {} stopped", thread_name);
        })?;

        Ok(Self {
            name: name.to_string(),
            tx,
        })
    }

    /// Queue a job without waiting for it
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            warn!("Worker {} is gone, dropping job", self.name);
        }
    }
}
