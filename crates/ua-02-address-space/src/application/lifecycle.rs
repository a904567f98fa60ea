//! # Lifecycle Manager
//!
//! Starts registered components in registration order and stops them in
//! reverse. A startup failure rolls back the components already started.

use crate::ports::{Lifecycle, LifecycleError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

struct Entry {
    component: Arc<dyn Lifecycle>,
    running: AtomicBool,
}

/// Ordered startup/shutdown of [`Lifecycle`] components.
#[derive(Default)]
pub struct LifecycleManager {
    entries: RwLock<Vec<Arc<Entry>>>,
}

impl LifecycleManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. It is started by the next [`start_all`](Self::start_all).
    pub fn register(&self, component: Arc<dyn Lifecycle>) {
        info!("[Lifecycle] Registering {}", component.name());
        self.entries.write().push(Arc::new(Entry {
            component,
            running: AtomicBool::new(false),
        }));
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of running components.
    pub fn running(&self) -> usize {
        self.entries
            .read()
            .iter()
            .filter(|e| e.running.load(Ordering::SeqCst))
            .count()
    }

    fn snapshot(&self) -> Vec<Arc<Entry>> {
        self.entries.read().clone()
    }

    /// Start every stopped component in registration order.
    ///
    /// On the first failure, components started by this call are stopped
    /// again in reverse order and the failure is returned.
    pub async fn start_all(&self) -> Result<(), LifecycleError> {
        let entries = self.snapshot();
        info!("[Lifecycle] Starting {} components", entries.len());

        let mut started: Vec<Arc<Entry>> = Vec::new();
        for entry in entries {
            if entry.running.load(Ordering::SeqCst) {
                continue;
            }
            let name = entry.component.name().to_string();
            match entry.component.startup().await {
                Ok(()) => {
                    entry.running.store(true, Ordering::SeqCst);
                    info!("[Lifecycle] ✓ {} started", name);
                    started.push(entry);
                }
                Err(e) => {
                    error!("[Lifecycle] ✗ {} failed to start: {}", name, e);
                    for entry in started.iter().rev() {
                        if let Err(stop_err) = entry.component.shutdown().await {
                            warn!("[Lifecycle] rollback of {} failed: {}", entry.component.name(), stop_err);
                        }
                        entry.running.store(false, Ordering::SeqCst);
                    }
                    return Err(e);
                }
            }
        }

        info!("[Lifecycle] All components started");
        Ok(())
    }

    /// Stop every running component in reverse registration order.
    ///
    /// Failures are logged and do not stop the remaining components; the
    /// first one is returned.
    pub async fn stop_all(&self) -> Result<(), LifecycleError> {
        info!("[Lifecycle] Stopping all components");
        let mut first_error = None;

        for entry in self.snapshot().iter().rev() {
            if !entry.running.swap(false, Ordering::SeqCst) {
                continue;
            }
            let name = entry.component.name().to_string();
            match entry.component.shutdown().await {
                Ok(()) => info!("[Lifecycle] ✓ {} stopped", name),
                Err(e) => {
                    error!("[Lifecycle] ✗ {} failed to stop cleanly: {}", name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        info!("[Lifecycle] All components stopped");
        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for LifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleManager")
            .field("components", &self.len())
            .field("running", &self.running())
            .finish()
    }
}
