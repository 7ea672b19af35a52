pub mod command;
pub mod commands;
pub mod error;
pub mod output;
pub mod parser;
pub mod session;
pub mod ui;

pub use command::*;
pub use commands::*;
pub use parser::*;
pub use session::*;
pub use ui::*;
