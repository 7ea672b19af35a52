use crate::cli::command::Command;
use crate::cli::output::{GREETING, UNPERSISTED_WARNING};
use crate::cli::parser::parse_command;
use crate::cli::ui::{BufferUi, Ui};
use crate::db::{StorageError, TaskStore};
use crate::error::{Result, YarrError};
use crate::models::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exited,
}

/// One run of the interpreter, holding the live task list
///
/// The session owns the list and lends it to each command for the duration
/// of a single `execute` call.
pub struct Session<S: TaskStore> {
    tasks: TaskList,
    storage: S,
    state: SessionState,
    unpersisted: bool,
}

impl<S: TaskStore> Session<S> {
    fn with_tasks(storage: S, tasks: TaskList) -> Self {
        Self {
            tasks,
            storage,
            state: SessionState::Running,
            unpersisted: false,
        }
    }

    /// Start a session from whatever the store holds
    ///
    /// A store that cannot be read is reported and treated as empty.
    pub fn open(storage: S, ui: &mut dyn Ui) -> Self {
        let loaded = storage.load_task_list();
        match loaded {
            Ok(tasks) => Self::with_tasks(storage, TaskList::from_tasks(tasks)),
            Err(e) => {
                log::warn!("Failed to load saved tasks, starting empty: {}", e);
                ui.print_message(&YarrError::Storage(e).to_string());
                Self::with_tasks(storage, TaskList::new())
            }
        }
    }

    /// Start a session, failing if the store cannot be read
    pub fn try_open(storage: S) -> std::result::Result<Self, StorageError> {
        let tasks = storage.load_task_list()?;
        Ok(Self::with_tasks(storage, TaskList::from_tasks(tasks)))
    }

    pub fn greet(&self, ui: &mut dyn Ui) {
        ui.print_message(GREETING);
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True when the in-memory list may be ahead of the store
    pub fn is_unpersisted(&self) -> bool {
        self.unpersisted
    }

    /// Parse and run one line, reporting any failure through `ui`
    pub fn handle_line(&mut self, line: &str, ui: &mut dyn Ui) -> SessionState {
        if let Err(e) = self.execute_line(line, ui) {
            if e.is_internal() {
                log::warn!("Command failed: {}", e);
                ui.print_message(&e.to_string());
                ui.print_message(UNPERSISTED_WARNING);
            } else {
                log::debug!("Rejected input {:?}: {:?}", line, e);
                ui.print_message(&e.to_string());
            }
        }
        self.state
    }

    /// Parse and run one line, returning any failure to the caller
    ///
    /// Lines arriving after `bye` are ignored.
    pub fn execute_line(&mut self, line: &str, ui: &mut dyn Ui) -> Result<()> {
        if self.state == SessionState::Exited {
            return Ok(());
        }
        let result = self.run_line(line.trim(), ui);
        if matches!(&result, Err(e) if e.is_internal()) {
            self.unpersisted = true;
        }
        result
    }

    /// String-in, string-out adapter for front ends
    pub fn respond(&mut self, line: &str) -> String {
        let mut ui = BufferUi::new();
        self.handle_line(line, &mut ui);
        ui.drain()
    }

    fn run_line(&mut self, line: &str, ui: &mut dyn Ui) -> Result<()> {
        let command = parse_command(line)?;
        if command.is_exit() {
            self.state = SessionState::Exited;
            self.close(ui);
        }
        let mutating = command.is_mutating();
        command.execute(&mut self.tasks, &self.storage, ui)?;
        if mutating {
            self.unpersisted = false;
        }
        Ok(())
    }

    /// Retry a failed save once, before leaving
    pub fn close(&mut self, ui: &mut dyn Ui) {
        if !self.unpersisted {
            return;
        }
        match self.storage.save_task_list(self.tasks.tasks()) {
            Ok(()) => self.unpersisted = false,
            Err(e) => {
                log::warn!("Final save failed: {}", e);
                ui.print_message(&YarrError::Storage(e).to_string());
            }
        }
    }

    /// Stop the session and hand back the store
    pub fn into_storage(self) -> S {
        self.storage
    }
}
