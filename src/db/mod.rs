pub mod connection;
pub mod migrations;
pub mod storage;

pub use connection::*;
pub use migrations::*;
pub use storage::*;
