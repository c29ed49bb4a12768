use crate::todo::{Priority, TodoItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Manual,
    DateAsc,
    DateDesc,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Manual => "custom",
            SortMode::DateAsc => "date-asc",
            SortMode::DateDesc => "date-desc",
        }
    }

    pub fn parse(raw: &str) -> SortMode {
        match raw {
            "date-asc" => SortMode::DateAsc,
            "date-desc" => SortMode::DateDesc,
            _ => SortMode::Manual,
        }
    }
}

/// Everything the visible list is derived from, besides the list itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoQuery {
    pub search: String,
    pub priority: Option<Priority>,
    pub sort: SortMode,
}

impl TodoQuery {
    /// The default view is the only place manual reordering is allowed.
    pub fn is_default_view(&self) -> bool {
        self.sort == SortMode::Manual
            && self.priority.is_none()
            && self.search.trim().is_empty()
    }
}

/// Pure derivation of the rendered list: priority filter, then
/// case-insensitive substring search over title and description, then order.
/// Date sorts are stable, so ties keep their original relative order. The
/// authoritative list is never mutated.
pub fn visible_todos(todos: &[TodoItem], query: &TodoQuery) -> Vec<TodoItem> {
    let needle = query.search.trim().to_lowercase();

    let mut next: Vec<TodoItem> = todos
        .iter()
        .filter(|todo| {
            if let Some(priority) = query.priority
                && todo.priority != priority
            {
                return false;
            }

            if !needle.is_empty() {
                let title_match = todo.title.to_lowercase().contains(&needle);
                let description_match = todo.description.to_lowercase().contains(&needle);
                if !title_match && !description_match {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect();

    match query.sort {
        SortMode::Manual => next.sort_by_key(|todo| todo.position),
        SortMode::DateAsc => next.sort_by_key(|todo| todo.todo_date),
        SortMode::DateDesc => next.sort_by(|a, b| b.todo_date.cmp(&a.todo_date)),
    }

    tracing::trace!(
        total = todos.len(),
        visible = next.len(),
        sort = query.sort.as_str(),
        "derived visible todos"
    );

    next
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn todo(id: i64, title: &str, priority: Priority, position: i64, date: &str) -> TodoItem {
        TodoItem {
            id,
            title: title.to_string(),
            description: format!("notes for {title}"),
            priority,
            is_completed: false,
            position,
            todo_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<TodoItem> {
        vec![
            todo(1, "Pay rent", Priority::Extreme, 3, "2026-09-03"),
            todo(2, "Water plants", Priority::Low, 1, "2026-09-01"),
            todo(3, "Send invoice", Priority::Moderate, 2, "2026-09-02"),
        ]
    }

    #[test]
    fn manual_sort_orders_by_position() {
        let visible = visible_todos(&sample(), &TodoQuery::default());
        let ids: Vec<i64> = visible.iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn priority_filter_and_search_are_conjunctive() {
        let mut todos = sample();
        todos.push(todo(4, "Pay electricity", Priority::Low, 4, "2026-09-04"));

        let query = TodoQuery {
            search: "pay".to_string(),
            priority: Some(Priority::Low),
            sort: SortMode::Manual,
        };
        let visible = visible_todos(&todos, &query);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 4);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_description() {
        let query = TodoQuery {
            search: "NOTES FOR SEND".to_string(),
            ..TodoQuery::default()
        };
        let visible = visible_todos(&sample(), &query);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn empty_result_is_a_valid_state() {
        let query = TodoQuery {
            search: "no such task".to_string(),
            ..TodoQuery::default()
        };
        assert!(visible_todos(&sample(), &query).is_empty());
    }

    #[test]
    fn date_sorts_are_exact_reverses_without_ties() {
        let todos = sample();
        let asc = visible_todos(
            &todos,
            &TodoQuery {
                sort: SortMode::DateAsc,
                ..TodoQuery::default()
            },
        );
        let mut desc = visible_todos(
            &todos,
            &TodoQuery {
                sort: SortMode::DateDesc,
                ..TodoQuery::default()
            },
        );
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn date_sort_breaks_ties_by_original_order() {
        let todos = vec![
            todo(1, "a", Priority::Low, 2, "2026-09-01"),
            todo(2, "b", Priority::Low, 1, "2026-09-01"),
        ];
        let asc = visible_todos(
            &todos,
            &TodoQuery {
                sort: SortMode::DateAsc,
                ..TodoQuery::default()
            },
        );
        let ids: Vec<i64> = asc.iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn derivation_leaves_input_untouched() {
        let todos = sample();
        let before = todos.clone();
        let _ = visible_todos(
            &todos,
            &TodoQuery {
                sort: SortMode::DateDesc,
                priority: Some(Priority::Low),
                search: "plants".to_string(),
            },
        );
        assert_eq!(todos, before);
    }

    #[test]
    fn default_view_detection() {
        assert!(TodoQuery::default().is_default_view());
        assert!(
            TodoQuery {
                search: "   ".to_string(),
                ..TodoQuery::default()
            }
            .is_default_view()
        );
        assert!(
            !TodoQuery {
                sort: SortMode::DateAsc,
                ..TodoQuery::default()
            }
            .is_default_view()
        );
    }
}
