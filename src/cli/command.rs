use crate::cli::output::{
    format_added, format_deleted, format_find_results, format_marked, format_task_list,
    format_unmarked, FAREWELL,
};
use crate::cli::ui::Ui;
use crate::db::TaskStore;
use crate::error::Result;
use crate::models::{Task, TaskList};

/// One validated user instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    ToggleMark { index: i64, done: bool },
    Delete { index: i64 },
    Add(Task),
    Find { keyword: String },
}

impl Command {
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }

    /// True for commands that change the task list and therefore save it
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::ToggleMark { .. } | Command::Delete { .. } | Command::Add(_))
    }

    /// Run the command against the session's task list
    ///
    /// Mutating commands save the full list before reporting. When the save
    /// fails the change is kept in memory, the report is still printed, and
    /// the storage error is returned.
    pub fn execute(
        self,
        tasks: &mut TaskList,
        storage: &dyn TaskStore,
        ui: &mut dyn Ui,
    ) -> Result<()> {
        let message = match self {
            Command::Exit => FAREWELL.to_string(),
            Command::List => format_task_list(tasks),
            Command::Find { keyword } => format_find_results(&keyword, &tasks.find(&keyword)),
            Command::ToggleMark { index, done } => {
                let task = tasks.set_done(index, done)?;
                let message = if done { format_marked(task) } else { format_unmarked(task) };
                return persist_then_report(tasks, storage, ui, message);
            }
            Command::Delete { index } => {
                let removed = tasks.remove(index)?;
                let message = format_deleted(&removed, tasks.len());
                return persist_then_report(tasks, storage, ui, message);
            }
            Command::Add(task) => {
                let message = format_added(&task, tasks.len() + 1);
                tasks.add(task);
                return persist_then_report(tasks, storage, ui, message);
            }
        };
        ui.print_message(&message);
        Ok(())
    }
}

fn persist_then_report(
    tasks: &TaskList,
    storage: &dyn TaskStore,
    ui: &mut dyn Ui,
    message: String,
) -> Result<()> {
    let saved = storage.save_task_list(tasks.tasks());
    if let Err(e) = &saved {
        log::warn!("Failed to save {} task(s): {}", tasks.len(), e);
    }
    ui.print_message(&message);
    saved?;
    Ok(())
}
