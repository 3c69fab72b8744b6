use std::fmt;

pub mod reader;
pub mod tokenizer;

pub use reader::{LineReader, ReadOutcome};
pub use tokenizer::{CommandLine, Direction, Redirection, Tokenizer};

use crate::core::config::{MAX_REDIRECTIONS, TOKEN_CAPACITY};

#[derive(Debug)]
pub enum InputError {
    Read(std::io::Error),
    LineTooLong(usize),
    TooManyTokens,
    TooManyRedirections,
    MissingRedirectTarget(Direction),
    ConflictingRedirection(Direction),
}

impl InputError {
    /// Read failures and a third redirection symbol end the shell; the rest
    /// only cost the current line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, InputError::Read(_) | InputError::TooManyRedirections)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Read(e) => write!(f, "failed to read input: {}", e),
            InputError::LineTooLong(max) => {
                write!(f, "line longer than {} bytes discarded", max)
            }
            InputError::TooManyTokens => {
                write!(f, "more than {} arguments", TOKEN_CAPACITY - 1)
            }
            InputError::TooManyRedirections => {
                write!(f, "at most {} redirections are allowed", MAX_REDIRECTIONS)
            }
            InputError::MissingRedirectTarget(direction) => {
                write!(f, "missing file name after '{}'", direction.symbol())
            }
            InputError::ConflictingRedirection(direction) => {
                write!(f, "'{}' given more than once", direction.symbol())
            }
        }
    }
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Read(e)
    }
}
