//! Hand-off from background threads to the UI thread
//!
//! Widgets are not thread-safe. Work running elsewhere, such as an upload
//! being received, submits closures through an [`AccessHandle`]; the UI
//! thread runs them against its context with [`UiQueue::run_pending`].

use std::fmt;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::trace;

use crate::error::{GuiError, GuiResult};

/// A unit of work to run on the UI thread against context `C`
pub type UiTask<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Receiving end, owned by the UI thread
pub struct UiQueue<C> {
    tx: mpsc::UnboundedSender<UiTask<C>>,
    rx: mpsc::UnboundedReceiver<UiTask<C>>,
}

impl<C> UiQueue<C> {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// A handle other threads can submit work through
    #[must_use]
    pub fn handle(&self) -> AccessHandle<C> {
        AccessHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run every task submitted so far; returns how many ran
    pub fn run_pending(&mut self, context: &mut C) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task(context);
            ran += 1;
        }
        if ran > 0 {
            trace!(tasks = ran, "ran UI tasks");
        }
        ran
    }
}

impl<C> Default for UiQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for UiQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiQueue").finish_non_exhaustive()
    }
}

/// Sending end; cheap to clone and `Send`
pub struct AccessHandle<C> {
    tx: mpsc::UnboundedSender<UiTask<C>>,
}

impl<C> AccessHandle<C> {
    /// Queue `task` for the UI thread
    pub fn access(&self, task: impl FnOnce(&mut C) + Send + 'static) -> GuiResult<()> {
        self.tx
            .send(Box::new(task))
            .map_err(|_| GuiError::AccessClosed)
    }

    /// Whether the UI side has gone away
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<C> Clone for AccessHandle<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C> fmt::Debug for AccessHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Run `work` on a new thread with a handle back to the UI thread
pub fn spawn_background<C, F>(handle: AccessHandle<C>, work: F) -> JoinHandle<()>
where
    C: 'static,
    F: FnOnce(AccessHandle<C>) + Send + 'static,
{
    thread::spawn(move || work(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Progress {
        received: Vec<u64>,
        done: bool,
    }

    #[test]
    fn test_background_progress_marshalled() {
        let mut queue: UiQueue<Progress> = UiQueue::new();
        let worker = spawn_background(queue.handle(), |ui| {
            for chunk in [10_u64, 20, 30] {
                ui.access(move |p| p.received.push(chunk)).unwrap();
            }
            ui.access(|p| p.done = true).unwrap();
        });
        worker.join().unwrap();

        let mut progress = Progress::default();
        assert_eq!(queue.run_pending(&mut progress), 4);
        assert_eq!(progress.received, vec![10, 20, 30]);
        assert!(progress.done);
        assert_eq!(queue.run_pending(&mut progress), 0);
    }

    #[test]
    fn test_access_fails_after_queue_dropped() {
        let queue: UiQueue<Progress> = UiQueue::new();
        let handle = queue.handle();
        drop(queue);
        assert!(handle.is_closed());
        assert!(matches!(
            handle.access(|p| p.done = true),
            Err(GuiError::AccessClosed)
        ));
    }
}
