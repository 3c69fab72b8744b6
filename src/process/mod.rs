use std::fmt;
use std::path::PathBuf;

pub mod executor;
pub mod signal;
pub mod sys;

pub use executor::{Executor, Outcome};
pub use signal::SignalController;

use crate::core::commands::CommandError;

#[derive(Debug)]
pub enum ProcessError {
    SignalInstall(std::io::Error),
    Fork(std::io::Error),
    Wait(std::io::Error),
    AbnormalTermination { pid: sys::Pid, signal: i32 },
    InvalidArgument(String),
    Redirect { target: PathBuf, source: std::io::Error },
    Builtin(CommandError),
}

impl ProcessError {
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ProcessError::InvalidArgument(_) | ProcessError::Redirect { .. }
        )
    }
}

impl From<CommandError> for ProcessError {
    fn from(e: CommandError) -> Self {
        ProcessError::Builtin(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::SignalInstall(e) => write!(f, "Signal error: {}", e),
            ProcessError::Fork(e) => write!(f, "Fork error: {}", e),
            ProcessError::Wait(e) => write!(f, "Wait error: {}", e),
            ProcessError::AbnormalTermination { pid, signal } => {
                write!(f, "Child {} exited abnormally (signal {})", pid, signal)
            }
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::Redirect { target, source } => {
                write!(f, "{}: {}", target.display(), source)
            }
            ProcessError::Builtin(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
