use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::{Result, YarrError};
use crate::utils::format_date_time;

/// Task variant and its type-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    Todo,
    Deadline { by: NaiveDateTime },
    Event { from: NaiveDateTime, to: NaiveDateTime },
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline { .. } => "deadline",
            TaskKind::Event { .. } => "event",
        }
    }

    /// Single-letter tag used in listings
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub is_done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    fn with_kind(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            is_done: false,
            kind,
        }
    }

    pub fn todo(description: impl Into<String>) -> Self {
        Self::with_kind(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: NaiveDateTime) -> Self {
        Self::with_kind(description, TaskKind::Deadline { by })
    }

    /// Create an event; the start must be strictly before the end
    pub fn event(
        description: impl Into<String>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Self> {
        if from >= to {
            return Err(YarrError::InvalidDateRange);
        }
        Ok(Self::with_kind(description, TaskKind::Event { from, to }))
    }

    pub fn status_marker(&self) -> char {
        if self.is_done { 'X' } else { ' ' }
    }

    /// Type-specific detail appended after the description
    pub fn detail(&self) -> Option<String> {
        match &self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(format!("(by: {})", format_date_time(by))),
            TaskKind::Event { from, to } => Some(format!(
                "(from: {} to: {})",
                format_date_time(from),
                format_date_time(to)
            )),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}] {}", self.kind.tag(), self.status_marker(), self.description)?;
        if let Some(detail) = self.detail() {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}
