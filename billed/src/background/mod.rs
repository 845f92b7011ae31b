pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Manages background store tasks
/// Tracks running tasks by key and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background loading task
    /// If a task with the same ID already exists, it will be cancelled first
    pub fn spawn_load_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Cancel existing task with same ID (prevents stale data)
        if let Some(handle) = self.tasks.remove(&task_id) {
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    /// Spawn a mutating task unless one with the same ID is still running.
    /// Issued mutations are never cancelled. Returns whether the task started.
    pub fn spawn_exclusive<F>(&mut self, task_id: String, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_running(&task_id) {
            return false;
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
        true
    }

    pub fn is_running(&self, task_id: &str) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn exclusive_task_blocks_same_key_until_done() {
        let mut manager = BackgroundTaskManager::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        assert!(manager.spawn_exclusive("update_bill_1".to_string(), async move {
            let _ = release_rx.await;
        }));
        assert!(manager.is_running("update_bill_1"));
        assert!(!manager.spawn_exclusive("update_bill_1".to_string(), async {}));
        assert!(manager.spawn_exclusive("update_bill_2".to_string(), async {}));

        release_tx.send(()).unwrap();
        while manager.is_running("update_bill_1") {
            tokio::task::yield_now().await;
        }
        assert!(manager.spawn_exclusive("update_bill_1".to_string(), async {}));
    }

    #[tokio::test]
    async fn load_task_replaces_running_one() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("load_bills".to_string(), std::future::pending::<()>());
        manager.spawn_load_task("load_bills".to_string(), std::future::pending::<()>());
        assert!(manager.is_running("load_bills"));
        manager.cancel_all();
        assert!(!manager.is_running("load_bills"));
    }
}
