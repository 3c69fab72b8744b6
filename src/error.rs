use crate::core::config::ConfigError;
use crate::input::InputError;
use crate::process::ProcessError;

/// Top-level error. `is_fatal` separates what ends the shell from what only
/// costs the current command.
#[derive(Debug)]
pub enum ShellError {
    Io(std::io::Error),
    Input(InputError),
    ProcessError(ProcessError),
    ConfigError(ConfigError),
    FlagError(String),
}

impl ShellError {
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Input(e) => e.is_fatal(),
            ShellError::ProcessError(e) => e.is_fatal(),
            ShellError::Io(_) | ShellError::ConfigError(_) | ShellError::FlagError(_) => true,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<InputError> for ShellError {
    fn from(err: InputError) -> Self {
        ShellError::Input(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::ConfigError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Input(e) => write!(f, "{}", e),
            ShellError::ProcessError(e) => write!(f, "{}", e),
            ShellError::ConfigError(e) => write!(f, "Config error: {}", e),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
