use thiserror::Error;

/// Why an input is not a valid EDTF string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input matches none of the level 0, 1 or 2 grammars. `offset` is
    /// the furthest byte offset any level reached before failing.
    #[error("not a valid EDTF string (no grammar matches at offset {offset})")]
    Grammar { offset: usize },

    #[error("invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i64, month: u8, day: u8 },

    #[error("invalid time of day: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// `minutes` is the signed offset as written.
    #[error("zone offset out of range: {minutes} minutes")]
    InvalidZoneOffset { minutes: i32 },
}

impl ParseError {
    /// The position of a grammar failure, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Grammar { offset } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
