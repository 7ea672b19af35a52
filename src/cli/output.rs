// User-facing wording and task rendering
//
// Front ends forward these strings verbatim, so tests match on them.

use crate::models::{Task, TaskList};

pub const GREETING: &str = "Ahoy, matey! I be Yarr, keeper of yer ship's log.\nWhat be yer orders?";

pub const FAREWELL: &str = "Fair winds and following seas, captain! Until we meet again.";

pub const EMPTY_LIST: &str = "Yer log be empty, captain. Not a single task on the horizon!";

pub const UNPERSISTED_WARNING: &str =
    "Beware! Me changes be held in memory only. I'll try to write the log again on yer next order.";

/// One numbered line per task, e.g. `1.[T][ ] read book`
pub fn format_task_line(index: usize, task: &Task) -> String {
    format!("{}.{}", index, task)
}

/// Render the full list
pub fn format_task_list(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let mut lines = vec!["Here be the tasks in yer log:".to_string()];
    lines.extend(tasks.iter().map(|(i, task)| format_task_line(i, task)));
    lines.join("\n")
}

/// Render search hits with their list indices
pub fn format_find_results(keyword: &str, hits: &[(usize, &Task)]) -> String {
    if hits.is_empty() {
        return format!("Nary a task matchin' '{}' be found in these waters, captain.", keyword);
    }
    let mut lines = vec![format!("Here be the tasks matchin' '{}':", keyword)];
    lines.extend(hits.iter().map(|(i, task)| format_task_line(*i, task)));
    lines.join("\n")
}

pub fn format_added(task: &Task, count: usize) -> String {
    format!(
        "Aye aye! I've added this task to the log:\n  {}\nNow ye have {} in the log.",
        task,
        task_count(count)
    )
}

pub fn format_deleted(task: &Task, remaining: usize) -> String {
    format!(
        "As ye command, this one has walked the plank:\n  {}\nOnly {} remain, captain!",
        task,
        task_count(remaining)
    )
}

pub fn format_marked(task: &Task) -> String {
    format!("Shiver me timbers! This task be done:\n  {}", task)
}

pub fn format_unmarked(task: &Task) -> String {
    format!("Arr, back to work it is! This task be not done yet:\n  {}", task)
}

fn task_count(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{} tasks", count)
    }
}
