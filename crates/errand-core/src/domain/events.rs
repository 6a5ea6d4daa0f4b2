//! Events - observer に届くライフサイクルイベント

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TaskId;
use super::state::TaskStatus;

/// One lifecycle transition of one task.
///
/// Each task produces exactly one `Started` event followed by exactly one
/// terminal event (`Succeeded` or `Failed`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub task_id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl TaskEvent {
    pub fn started(task_id: TaskId, name: &str, at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            name: name.to_string(),
            status: TaskStatus::Started,
            message: format!("Executing {name}..."),
            at,
        }
    }

    pub fn succeeded(task_id: TaskId, name: &str, at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            name: name.to_string(),
            status: TaskStatus::Succeeded,
            message: format!("{name} finished successfully"),
            at,
        }
    }

    pub fn failed(task_id: TaskId, name: &str, error: &str, at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            name: name.to_string(),
            status: TaskStatus::Failed,
            message: format!("{name} failed: {error}"),
            at,
        }
    }

    /// `"started"`, `"succeeded"` or `"failed"`.
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn messages_reference_the_task_name() {
        let id = TaskId::new(3);

        let e = TaskEvent::started(id, "Disk cleanup", at());
        assert_eq!(e.message, "Executing Disk cleanup...");
        assert_eq!(e.label(), "started");
        assert!(!e.is_terminal());

        let e = TaskEvent::succeeded(id, "Disk cleanup", at());
        assert_eq!(e.message, "Disk cleanup finished successfully");
        assert!(e.is_terminal());

        let e = TaskEvent::failed(id, "Disk cleanup", "access denied", at());
        assert_eq!(e.message, "Disk cleanup failed: access denied");
        assert_eq!(e.label(), "failed");
    }

    #[test]
    fn event_json_shape() {
        let e = TaskEvent::succeeded(TaskId::new(9), "Merge PDFs", at());
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["task_id"], 9);
        assert_eq!(v["status"], "succeeded");
        assert_eq!(v["name"], "Merge PDFs");
    }
}
