use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TaskId;
use super::state::TaskState;

/// Bookkeeping for one in-flight task.
///
/// Lives in the registry from `submit` until the terminal transition.
/// The unit of work itself travels separately through the worker queue.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,
    pub state: TaskState,
    pub submitted_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    pub fn new(id: TaskId, name: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            state: TaskState::Pending,
            submitted_at,
            started_at: None,
        }
    }

    /// `Pending -> Running`. Returns false if the record is not pending.
    pub fn mark_running(&mut self, at: DateTime<Utc>) -> bool {
        if !self.state.can_transition_to(TaskState::Running) {
            return false;
        }
        self.state = TaskState::Running;
        self.started_at = Some(at);
        true
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id,
            name: self.name.clone(),
            state: self.state,
            submitted_at: self.submitted_at,
            started_at: self.started_at,
        }
    }
}

/// Read-only view of an active task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub name: String,
    pub state: TaskState,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Label used when the caller does not name a task.
pub fn default_task_name(id: TaskId) -> String {
    format!("Task {}", id.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_starts_pending_and_runs_once() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut rec = TaskRecord::new(TaskId::new(1), "Resize images".into(), t0);
        assert_eq!(rec.state, TaskState::Pending);
        assert!(rec.started_at.is_none());

        assert!(rec.mark_running(t0));
        assert_eq!(rec.state, TaskState::Running);
        assert_eq!(rec.started_at, Some(t0));

        // 二回目の Running 遷移は拒否される
        assert!(!rec.mark_running(t0));
    }

    #[test]
    fn default_name_uses_numeric_id() {
        assert_eq!(default_task_name(TaskId::new(12)), "Task 12");
    }

    #[test]
    fn snapshot_omits_missing_start_time() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let rec = TaskRecord::new(TaskId::new(1), "x".into(), t0);
        let v = serde_json::to_value(rec.snapshot()).unwrap();
        assert_eq!(v["state"], "pending");
        assert!(v.get("started_at").is_none());
    }
}
