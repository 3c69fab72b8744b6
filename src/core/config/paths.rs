use std::path::{Path, PathBuf};

use super::RC_FILE_NAME;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    rc_path: Option<PathBuf>,
    required: bool,
}

impl ConfigPaths {
    /// An explicitly named file must exist; the default `~/.simpshrc` may not.
    pub fn new(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(path) => Self::with_rc_path(Some(path), true),
            None => Self::with_rc_path(dirs::home_dir().map(|home| home.join(RC_FILE_NAME)), false),
        }
    }

    pub fn with_rc_path(rc_path: Option<PathBuf>, required: bool) -> Self {
        Self { rc_path, required }
    }

    pub fn rc_path(&self) -> Option<&Path> {
        self.rc_path.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}
