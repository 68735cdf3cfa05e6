//! Widget Activation
//!
//! Activating a widget spawns one task that runs the pipeline and publishes
//! the result on a watch channel. Deactivating aborts the task; a resolution
//! that arrives afterwards is dropped instead of touching the widget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::WidgetState;
use crate::pipeline::{self, DataSourceConfig, StatsFetcher};

/// Handle to one activated widget
pub struct WidgetHandle {
    endpoint: String,
    state: watch::Receiver<WidgetState>,
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl WidgetHandle {
    /// Activate a widget: exactly one fetch is started, in the background
    pub fn activate(fetcher: Arc<dyn StatsFetcher>, source: DataSourceConfig) -> Self {
        let (tx, rx) = watch::channel(WidgetState::Loading);
        let active = Arc::new(AtomicBool::new(true));
        let endpoint = source.endpoint.clone();

        let guard = Arc::clone(&active);
        let task = tokio::spawn(async move {
            let resolution = pipeline::fetch_and_normalize(fetcher.as_ref(), &source).await;

            if !guard.load(Ordering::SeqCst) {
                tracing::debug!(endpoint = %source.endpoint, "Widget deactivated, discarding resolution");
                return;
            }

            // Loading -> Ready/Fallback, never again
            tx.send_if_modified(|state| {
                if state.is_loading() {
                    *state = resolution.into();
                    true
                } else {
                    false
                }
            });
        });

        tracing::debug!(endpoint = %endpoint, "Widget activated");

        Self {
            endpoint,
            state: rx,
            active,
            task: Some(task),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Snapshot of the current state
    pub fn state(&self) -> WidgetState {
        self.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for the widget to leave `Loading`
    ///
    /// Returns `None` if the widget was deactivated before it resolved.
    pub async fn resolved(&self) -> Option<WidgetState> {
        let mut rx = self.state.clone();
        let result = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        result
    }

    /// Stop the widget. Safe to call more than once.
    pub fn deactivate(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            tracing::debug!(endpoint = %self.endpoint, "Widget deactivated");
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for WidgetHandle {
    fn drop(&mut self) {
        self.deactivate();
    }
}
