use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::persona::Persona;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Owner {
    You,
    Ai,
    Team,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub owner: Owner,
    pub due_date: Option<NaiveDate>,
    pub agent: Option<Persona>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Done
    }

    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_open() && self.due_date.is_some_and(|due| due < as_of)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::{Owner, Priority, Task, TaskStatus};

    fn task(status: TaskStatus, due: Option<&str>) -> Task {
        Task {
            id: "t-1".to_string(),
            title: "ship the deck".to_string(),
            priority: Priority::Medium,
            status,
            owner: Owner::You,
            due_date: due.map(|raw| raw.parse().expect("valid date literal")),
            agent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn done_tasks_are_never_overdue() {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor");
        assert!(!task(TaskStatus::Done, Some("2025-12-01")).is_overdue(anchor));
        assert!(task(TaskStatus::Todo, Some("2025-12-01")).is_overdue(anchor));
    }

    #[test]
    fn task_due_on_anchor_day_is_not_overdue() {
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid anchor");
        assert!(!task(TaskStatus::Todo, Some("2026-01-08")).is_overdue(anchor));
        assert!(!task(TaskStatus::InProgress, None).is_overdue(anchor));
    }
}
