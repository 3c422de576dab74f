use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Keyed background tasks. Spawning under a key aborts whatever ran there before.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: &'static str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key, task) {
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn abort_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}
