use crate::error::{Result, YarrError};
use crate::models::Task;

/// Ordered task collection addressed by 1-based index
///
/// Indices shown to the user are always position + 1 in the current order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Full ordered snapshot, as persisted
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterate tasks paired with their 1-based index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, task)| (i + 1, task))
    }

    /// Map a 1-based index to a vector position
    fn position(&self, index: i64) -> Result<usize> {
        if index < 1 || index as u64 > self.tasks.len() as u64 {
            return Err(YarrError::IndexOutOfRange { index, count: self.tasks.len() });
        }
        Ok((index - 1) as usize)
    }

    /// Append a task and return the new count
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn get(&self, index: i64) -> Result<&Task> {
        let pos = self.position(index)?;
        Ok(&self.tasks[pos])
    }

    /// Display string of the task at `index`
    pub fn describe(&self, index: i64) -> Result<String> {
        self.get(index).map(|task| task.to_string())
    }

    /// Remove the task at `index`; later tasks shift down by one
    pub fn remove(&mut self, index: i64) -> Result<Task> {
        let pos = self.position(index)?;
        Ok(self.tasks.remove(pos))
    }

    pub fn set_done(&mut self, index: i64, done: bool) -> Result<&Task> {
        let pos = self.position(index)?;
        let task = &mut self.tasks[pos];
        task.is_done = done;
        Ok(task)
    }

    /// Tasks whose description contains `keyword` (case-sensitive), with their indices
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.iter()
            .filter(|(_, task)| task.description.contains(keyword))
            .collect()
    }
}
