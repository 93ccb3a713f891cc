//! Background insight worker.
//!
//! Runs the insight service off the caller's thread and hands the text back
//! through a channel. The caller never blocks unless it asks to.

use super::service::InsightService;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::error;

const WORKER_LOST: &str = "Error: insight worker stopped before producing a response";

pub struct InsightWorker;

impl InsightWorker {
    pub fn spawn(service: Arc<InsightService>, prompt: String) -> InsightHandle {
        let (tx, rx) = mpsc::channel();
        let join = std::thread::Builder::new()
            .name("roster-insight".to_string())
            .spawn(move || {
                let text = service.respond(&prompt);
                // Receiver may be gone if the caller lost interest.
                let _ = tx.send(text);
            });

        match join {
            Ok(join) => InsightHandle {
                rx: Some(rx),
                join: Some(join),
                done: None,
            },
            Err(e) => {
                error!("Failed to spawn insight worker: {}", e);
                InsightHandle {
                    rx: None,
                    join: None,
                    done: Some(format!("Error: failed to start insight worker: {}", e)),
                }
            }
        }
    }
}

/// Pending insight text.
pub struct InsightHandle {
    rx: Option<Receiver<String>>,
    join: Option<JoinHandle<()>>,
    done: Option<String>,
}

impl InsightHandle {
    /// Non-blocking poll. `None` while the worker is still running.
    pub fn try_take(&mut self) -> Option<String> {
        if let Some(done) = self.done.take() {
            return Some(done);
        }
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(text) => {
                self.finish();
                Some(text)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finish();
                Some(WORKER_LOST.to_string())
            }
        }
    }

    /// Block until the worker delivers.
    pub fn wait(mut self) -> String {
        if let Some(done) = self.done.take() {
            return done;
        }
        let text = match self.rx.as_ref().map(|rx| rx.recv()) {
            Some(Ok(text)) => text,
            _ => WORKER_LOST.to_string(),
        };
        self.finish();
        text
    }

    fn finish(&mut self) {
        self.rx = None;
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                error!("Insight worker panicked");
            }
        }
    }
}
