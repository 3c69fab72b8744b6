use std::fmt;
use std::path::PathBuf;

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

/// Prompt printed before every read.
pub const PROMPT: &str = "linux> ";
/// Bytes an input line may occupy, terminator included.
pub const LINE_CAPACITY: usize = 256;
/// Entries in a token vector, terminating sentinel included.
pub const TOKEN_CAPACITY: usize = 128;
/// Entries in the environment table handed to children.
pub const ENV_SIZE: usize = 4;
/// Bytes a single `NAME=value` environment entry may occupy, terminator included.
pub const ENV_FIELD_SIZE: usize = 256;
/// Redirection symbols accepted on one line.
pub const MAX_REDIRECTIONS: usize = 2;

pub const SHELL_ID: &str = "simpsh";
pub const DEFAULT_SEARCH_PATH: &str = "/usr/bin/:";
pub const DEFAULT_TERM: &str = "dumb";
pub const RC_FILE_NAME: &str = ".simpshrc";

/// Status returned for an empty command line; never recorded.
pub const NO_OP_STATUS: i32 = 255;
/// Child exit status when the command cannot be found on the search path.
pub const NOT_FOUND_STATUS: i32 = 255;
/// Child exit status when the image exists but cannot be executed.
pub const EXEC_FAILURE_STATUS: i32 = 126;
/// Child exit status when a redirection target cannot be opened.
pub const REDIRECT_FAILURE_STATUS: i32 = 1;
/// Status recorded when a foreground wait is abandoned by an interrupt.
pub const INTERRUPTED_STATUS: i32 = 130;
/// Status recorded after a recoverable error in the shell itself.
pub const RECOVERABLE_ERROR_STATUS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub search_path: String,
    pub term: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            term: DEFAULT_TERM.to_string(),
        }
    }
}

impl ShellConfig {
    /// Defaults overlaid with whatever the rc file sets.
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        ConfigLoader::new(paths).load_configs(&mut config)?;
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigFileNotFound(PathBuf),
    IoError(std::io::Error),
    FieldTooLong(String),
    MalformedLine(usize, String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigFileNotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::FieldTooLong(key) => write!(
                f,
                "value of {} does not fit in {} bytes",
                key,
                ENV_FIELD_SIZE - 1
            ),
            ConfigError::MalformedLine(number, line) => {
                write!(f, "malformed line {}: {}", number, line)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
