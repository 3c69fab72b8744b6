use std::fmt;
use std::path::PathBuf;

pub mod resolver;

pub use resolver::{is_bare, PathResolver};

#[derive(Debug)]
pub enum PathError {
    InvalidSearchPath(String),
    DirectoryUnreadable {
        dir: PathBuf,
        source: std::io::Error,
    },
    NotFound(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidSearchPath(msg) => write!(f, "invalid search path: {}", msg),
            PathError::DirectoryUnreadable { dir, source } => {
                write!(f, "{}: {}", dir.display(), source)
            }
            PathError::NotFound(name) => write!(f, "{}: command not found", name),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::DirectoryUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}
