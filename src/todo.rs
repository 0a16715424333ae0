//! Session-scoped task list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FsError;

const RULE_WIDTH: usize = 50;

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub priority: TodoPriority,
    #[serde(default)]
    pub status: TodoStatus,
}

/// The task list owned by one session.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

/// Result of `TodoList::write`.
#[derive(Debug, Clone, Copy)]
pub struct TodoWriteReport {
    pub count: usize,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Replace the whole list. Nothing changes unless every item is valid.
    pub fn write(&mut self, items: Vec<TodoItem>) -> Result<TodoWriteReport, FsError> {
        if items.is_empty() {
            return Err(FsError::MissingArgument("items".to_string()));
        }
        if let Some(blank) = items.iter().find(|item| item.content.trim().is_empty()) {
            return Err(FsError::InvalidArgument(format!(
                "todo {} has empty content",
                blank.id
            )));
        }
        self.items = items;
        log::debug!("todo list replaced with {} items", self.items.len());
        Ok(TodoWriteReport {
            count: self.items.len(),
        })
    }

    pub fn completed(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == TodoStatus::Completed)
            .count()
    }
}

impl fmt::Display for TodoWriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Success: wrote {} todos", self.count)
    }
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "Todo list is empty");
        }
        writeln!(f, "Todo List:")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, item) in self.items.iter().enumerate() {
            let icon = match item.status {
                TodoStatus::Pending => "[ ]",
                TodoStatus::InProgress => "[→]",
                TodoStatus::Completed => "[✓]",
                TodoStatus::Cancelled => "[✗]",
            };
            let priority = match item.priority {
                TodoPriority::Low => "low",
                TodoPriority::Medium => "medium",
                TodoPriority::High => "high",
            };
            writeln!(f, "{}. {icon} {} ({priority})", i + 1, item.content)?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        let total = self.items.len();
        let completed = self.completed();
        write!(
            f,
            "Total: {total} items ({completed} completed, {} pending)",
            total - completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, content: &str, status: TodoStatus) -> TodoItem {
        TodoItem {
            id,
            content: content.to_string(),
            priority: TodoPriority::Medium,
            status,
        }
    }

    #[test]
    fn write_replaces_the_whole_list() {
        let mut list = TodoList::new();
        list.write(vec![item(0, "a", TodoStatus::Pending)]).unwrap();
        list.write(vec![
            item(1, "b", TodoStatus::Completed),
            item(2, "c", TodoStatus::InProgress),
        ])
        .unwrap();
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.items()[0].content, "b");
    }

    #[test]
    fn invalid_writes_keep_previous_items() {
        let mut list = TodoList::new();
        list.write(vec![item(0, "keep", TodoStatus::Pending)]).unwrap();

        assert!(matches!(list.write(Vec::new()), Err(FsError::MissingArgument(_))));
        assert!(matches!(
            list.write(vec![item(1, "ok", TodoStatus::Pending), item(2, " ", TodoStatus::Pending)]),
            Err(FsError::InvalidArgument(_))
        ));
        assert_eq!(list.items(), &[item(0, "keep", TodoStatus::Pending)]);
    }

    #[test]
    fn renders_checklist_with_summary() {
        let mut list = TodoList::new();
        assert_eq!(list.to_string(), "Todo list is empty");

        list.write(vec![
            item(0, "read notes", TodoStatus::Completed),
            item(1, "write code", TodoStatus::InProgress),
            item(2, "drop idea", TodoStatus::Cancelled),
        ])
        .unwrap();
        let text = list.to_string();
        assert!(text.contains("1. [✓] read notes (medium)"));
        assert!(text.contains("2. [→] write code (medium)"));
        assert!(text.ends_with("Total: 3 items (1 completed, 2 pending)"));
    }

    #[test]
    fn defaults_apply_when_deserializing() {
        let item: TodoItem = serde_json::from_str(r#"{"id": 4, "content": "x"}"#).unwrap();
        assert_eq!(item.priority, TodoPriority::Medium);
        assert_eq!(item.status, TodoStatus::Pending);
    }
}
