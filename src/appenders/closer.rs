//! Background closing of rotated-out file handles
//!
//! Rotation hands the previous file to a worker thread so the write that
//! triggered it does not wait for the close. There is no ordering between the
//! old file's last flush and the new file's first write. [`HandleCloser::drain`]
//! blocks until everything scheduled so far has been released.

use crate::core::error::{LoggerError, Result};
use crate::core::metrics::RotationMetrics;
use crossbeam_channel::{bounded, unbounded, Sender};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

enum CloseRequest {
    Close { path: PathBuf, file: File },
    Drain(Sender<()>),
}

pub struct HandleCloser {
    sender: Option<Sender<CloseRequest>>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<RotationMetrics>,
}

impl HandleCloser {
    /// Start the closer thread
    ///
    /// # Errors
    ///
    /// Returns error if the worker thread cannot be spawned
    pub fn spawn(metrics: Arc<RotationMetrics>) -> Result<Self> {
        let (sender, receiver) = unbounded::<CloseRequest>();
        let worker_metrics = Arc::clone(&metrics);

        let worker = thread::Builder::new()
            .name("tinylog-closer".to_string())
            .spawn(move || {
                // Requests are served in order, so a drain ack implies every
                // earlier close has completed.
                for request in receiver {
                    match request {
                        CloseRequest::Close { path, file } => {
                            drop(file);
                            worker_metrics.record_handle_closed();
                            tracing::debug!(path = %path.display(), "closed rotated log file");
                        }
                        CloseRequest::Drain(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })
            .map_err(|e| LoggerError::io_operation("starting closer thread", "spawn failed", e))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            metrics,
        })
    }

    /// Queue `file` for closing without waiting for it
    pub fn schedule(&self, path: PathBuf, file: File) {
        self.metrics.record_handle_scheduled();
        let request = CloseRequest::Close { path, file };

        let Some(sender) = self.sender.as_ref() else {
            drop(request);
            self.metrics.record_handle_closed();
            return;
        };

        if let Err(rejected) = sender.send(request) {
            // Worker is gone; close inline instead.
            drop(rejected.into_inner());
            self.metrics.record_handle_closed();
        }
    }

    /// Block until every handle scheduled before this call is closed
    pub fn drain(&self) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        let (ack_tx, ack_rx) = bounded(1);
        if sender.send(CloseRequest::Drain(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for HandleCloser {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("log file closer thread panicked");
            }
        }
    }
}
