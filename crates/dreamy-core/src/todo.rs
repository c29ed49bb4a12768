use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Extreme,
    Moderate,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Extreme, Priority::Moderate, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Extreme => "extreme",
            Priority::Moderate => "moderate",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Extreme => "Extreme",
            Priority::Moderate => "Moderate",
            Priority::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Priority> {
        match raw {
            "extreme" => Some(Priority::Extreme),
            "moderate" => Some(Priority::Moderate),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub priority: Priority,

    #[serde(default)]
    pub is_completed: bool,

    /// Manual ordering key. Unique within a list, dense 1..N after every
    /// reorder, but the server does not promise contiguity on load.
    pub position: i64,

    pub todo_date: NaiveDate,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Paginated envelope returned by `GET /todos/`. Only `results` is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<TodoItem>,
}

/// Request body for `POST /todos/` and `PATCH /todos/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoPayload {
    pub title: String,
    pub description: String,
    pub todo_date: NaiveDate,
    pub priority: Priority,
}

/// Transient edit state for the todo modal. `todo_date` stays a raw string
/// from the date input until validation parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub todo_date: String,
    pub priority: Priority,
}

impl TodoDraft {
    pub fn empty() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            todo_date: String::new(),
            priority: Priority::Moderate,
        }
    }

    pub fn for_edit(todo: &TodoItem) -> Self {
        Self {
            id: Some(todo.id),
            title: todo.title.clone(),
            description: todo.description.clone(),
            todo_date: todo.todo_date.format("%Y-%m-%d").to_string(),
            priority: todo.priority,
        }
    }
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_roundtrips_through_wire_names() {
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn todo_item_parses_server_shape() {
        let raw = r#"{
            "id": 7,
            "title": "File taxes",
            "description": "",
            "priority": "extreme",
            "is_completed": false,
            "position": 3,
            "todo_date": "2026-04-15",
            "created_at": "2026-01-02T09:30:00Z",
            "updated_at": "2026-01-02T09:30:00Z"
        }"#;

        let todo: TodoItem = serde_json::from_str(raw).expect("parse todo");
        assert_eq!(todo.id, 7);
        assert_eq!(todo.priority, Priority::Extreme);
        assert_eq!(todo.todo_date, NaiveDate::from_ymd_opt(2026, 4, 15).expect("date"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{
            "id": 1,
            "title": "Walk",
            "priority": "low",
            "position": 1,
            "todo_date": "2026-02-01"
        }"#;

        let todo: TodoItem = serde_json::from_str(raw).expect("parse todo");
        assert_eq!(todo.description, "");
        assert!(!todo.is_completed);
        assert!(todo.created_at.is_none());
    }

    #[test]
    fn draft_for_edit_formats_date_for_input() {
        let todo = TodoItem {
            id: 2,
            title: "Trim hedge".to_string(),
            description: String::new(),
            priority: Priority::Low,
            is_completed: false,
            position: 1,
            todo_date: NaiveDate::from_ymd_opt(2026, 9, 5).expect("date"),
            created_at: None,
            updated_at: None,
        };

        let draft = TodoDraft::for_edit(&todo);
        assert_eq!(draft.id, Some(2));
        assert_eq!(draft.todo_date, "2026-09-05");
    }
}
