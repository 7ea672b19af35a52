// Error taxonomy for command handling
//
// The Display text of each variant is the message shown to the user, so it
// carries the persona wording.

use thiserror::Error;
use crate::db::StorageError;

/// Everything that can go wrong while turning a line into an executed command
#[derive(Debug, Error)]
pub enum YarrError {
    #[error("Arrr, me apologies! I cannot fathom that.")]
    UnrecognizedCommand,

    #[error("Blunder! '{0}' be no task number I can reckon with, me heartie!")]
    InvalidIndexFormat(String),

    #[error("Blunder! I be searchin' the seas but couldn't spy task {index}. Ye only have {count} on the list, me heartie!")]
    IndexOutOfRange { index: i64, count: usize },

    #[error("Blunder! Declare yer deadline as such: 'deadline * /by *', ye scurvy dog!")]
    MalformedDeadline,

    #[error("Blunder! Declare yer event as such: 'event * /from * /to *', ye scurvy dog!")]
    MalformedEvent,

    #[error("Blunder! The date '{0}' be as tangled as a ship's riggin'.\nWrite yer dates in the format dd/MM/yyyy HHmm, ye scurvy dog!")]
    InvalidDateFormat(String),

    #[error("Blunder! The start of yer event must come before its end, ye scurvy dog!")]
    InvalidDateRange,

    #[error("Blunder! Tell me what treasure to hunt for: 'find <keyword>'")]
    MissingKeyword,

    #[error("Blunder! The ship's log be damaged: {0}")]
    Storage(#[from] StorageError),
}

impl YarrError {
    /// True for failures of the persistence layer rather than of user input
    pub fn is_internal(&self) -> bool {
        matches!(self, YarrError::Storage(_))
    }
}

pub type Result<T, E = YarrError> = std::result::Result<T, E>;
