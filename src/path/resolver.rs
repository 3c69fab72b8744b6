use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use super::PathError;
use crate::input::Tokenizer;

/// A name with no `/` that does not start with `.` is looked up on the search path.
pub fn is_bare(name: &OsStr) -> bool {
    let bytes = name.as_bytes();
    !bytes.is_empty() && !bytes.contains(&b'/') && !bytes.starts_with(b".")
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    dirs: Vec<PathBuf>,
}

impl PathResolver {
    pub fn new(search_path: &str) -> Result<Self, PathError> {
        let dirs = Tokenizer::for_search_path()
            .split(search_path)
            .map_err(|e| PathError::InvalidSearchPath(e.to_string()))?
            .into_iter()
            .map(PathBuf::from)
            .collect();
        Ok(Self { dirs })
    }

    /// Scans each directory in order for an entry named exactly `name`.
    ///
    /// A directory that cannot be listed stops the search instead of being
    /// skipped.
    pub fn resolve(&self, name: &OsStr) -> Result<PathBuf, PathError> {
        for dir in &self.dirs {
            let unreadable = |source| PathError::DirectoryUnreadable {
                dir: dir.clone(),
                source,
            };

            for entry in fs::read_dir(dir).map_err(unreadable)? {
                if entry.map_err(unreadable)?.file_name().as_os_str() == name {
                    let resolved = dir.join(name);
                    log::debug!("resolved {:?} to {}", name, resolved.display());
                    return Ok(resolved);
                }
            }
        }

        Err(PathError::NotFound(name.to_string_lossy().into_owned()))
    }
}
