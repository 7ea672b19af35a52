// Core data models for Yarr

pub mod task;
pub mod task_list;

pub use task::*;
pub use task_list::*;
