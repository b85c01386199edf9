//! Task record.

use serde::{Deserialize, Serialize};

/// Task identifier, assigned sequentially by the store starting at 1.
pub type TaskId = u64;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    /// Create a task that is not done yet.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_not_done() {
        let task = Task::new(3, "buy milk");
        assert_eq!(task.id, 3);
        assert_eq!(task.title, "buy milk");
        assert!(!task.done);
    }

    #[test]
    fn test_task_json_shape() {
        let json = serde_json::to_value(Task::new(1, "pay rent")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "title": "pay rent", "done": false })
        );
    }
}
