//! In-memory task store.
//!
//! A single mutex guards the whole collection and the id counter. Reads take
//! the same lock as writes, so no caller ever observes a half-applied change.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::debug;

use common::{AppResult, OptionExt};
use domain::{Task, TaskId, MSG_TASK_NOT_FOUND};

#[derive(Debug)]
struct Inner {
    tasks: BTreeMap<TaskId, Task>,
    next_id: TaskId,
}

/// Authoritative collection of tasks for one process.
#[derive(Debug)]
pub struct TaskStore {
    inner: Mutex<Inner>,
}

impl TaskStore {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Snapshot of every task. Order is not part of the contract.
    pub fn list(&self) -> Vec<Task> {
        let inner = self.inner.lock();
        inner.tasks.values().cloned().collect()
    }

    /// Fetch a task by id.
    pub fn get(&self, id: TaskId) -> AppResult<Task> {
        let inner = self.inner.lock();
        inner.tasks.get(&id).cloned().ok_or_not_found(MSG_TASK_NOT_FOUND)
    }

    /// Store a new task under the next id and return it.
    ///
    /// The title is stored as given; rejecting blank titles is the caller's job.
    pub fn create(&self, title: impl Into<String>) -> Task {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        let task = Task::new(id, title);
        inner.tasks.insert(id, task.clone());
        inner.next_id += 1;
        debug!(task_id = id, "task created");
        task
    }

    /// Set the `done` flag of an existing task.
    pub fn update_done(&self, id: TaskId, done: bool) -> AppResult<()> {
        let mut inner = self.inner.lock();
        let task = inner.tasks.get_mut(&id).ok_or_not_found(MSG_TASK_NOT_FOUND)?;
        task.done = done;
        debug!(task_id = id, done, "task updated");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
