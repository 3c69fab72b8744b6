use std::ffi::{CString, NulError};

use crate::core::config::{
    ShellConfig, DEFAULT_SEARCH_PATH, DEFAULT_TERM, ENV_FIELD_SIZE, ENV_SIZE, SHELL_ID,
};

const SHELL_SLOT: usize = 0;
const PATH_SLOT: usize = 1;
const TERM_SLOT: usize = 2;
const STATUS_SLOT: usize = 3;

const STATUS_PREFIX: &str = "?=";
const PATH_PREFIX: &str = "PATH=";

/// Whether `NAME=value` fits in one environment field, terminator included.
pub fn field_fits(name: &str, value: &str) -> bool {
    name.len() + 1 + value.len() < ENV_FIELD_SIZE
}

/// The fixed table of variables handed to every child.
///
/// Entries are, in order: shell id, search path, terminal type and last exit
/// status. Only the status entry changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    entries: [String; ENV_SIZE],
}

impl Default for Environment {
    fn default() -> Self {
        Self::initialize()
    }
}

impl Environment {
    pub fn initialize() -> Self {
        Self::build(DEFAULT_SEARCH_PATH, DEFAULT_TERM)
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::build(&config.search_path, &config.term)
    }

    fn build(search_path: &str, term: &str) -> Self {
        let mut entries: [String; ENV_SIZE] = Default::default();
        entries[SHELL_SLOT] = format!("SHELL={}", SHELL_ID);
        entries[PATH_SLOT] = format!("{}{}", PATH_PREFIX, search_path);
        entries[TERM_SLOT] = format!("TERM={}", term);
        entries[STATUS_SLOT] = STATUS_PREFIX.to_string();
        Self { entries }
    }

    /// Overwrites the status entry with `?=<code>`.
    pub fn record_status(&mut self, code: i32) {
        let entry = format!("{}{}", STATUS_PREFIX, code);
        // i32 renders in at most 11 bytes
        debug_assert!(entry.len() < ENV_FIELD_SIZE);
        log::debug!("recording status {}", entry);
        self.entries[STATUS_SLOT] = entry;
    }

    /// The last recorded status, if any command has completed yet.
    pub fn status(&self) -> Option<i32> {
        self.entries[STATUS_SLOT]
            .strip_prefix(STATUS_PREFIX)
            .and_then(|code| code.parse().ok())
    }

    pub fn search_path(&self) -> &str {
        self.entries[PATH_SLOT]
            .strip_prefix(PATH_PREFIX)
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn to_c_strings(&self) -> Result<Vec<CString>, NulError> {
        self.entries
            .iter()
            .map(|entry| CString::new(entry.as_bytes()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_order() {
        let env = Environment::initialize();
        assert_eq!(
            env.entries(),
            ["SHELL=simpsh", "PATH=/usr/bin/:", "TERM=dumb", "?="]
        );
        assert_eq!(env.status(), None);
    }

    #[test]
    fn test_record_status_only_touches_status() {
        let mut env = Environment::initialize();
        env.record_status(7);
        env.record_status(0);

        assert_eq!(env.entries()[3], "?=0");
        assert_eq!(env.status(), Some(0));
        assert_eq!(&env.entries()[..3], &Environment::initialize().entries()[..3]);
    }

    #[test]
    fn test_record_extreme_status() {
        let mut env = Environment::initialize();
        env.record_status(i32::MIN);
        assert_eq!(env.entries()[3], "?=-2147483648");
        assert!(env.entries()[3].len() < ENV_FIELD_SIZE);
    }

    #[test]
    fn test_from_config() {
        let config = ShellConfig {
            prompt: "> ".to_string(),
            search_path: "/bin/:/usr/bin/".to_string(),
            term: "xterm".to_string(),
        };
        let env = Environment::from_config(&config);
        assert_eq!(env.search_path(), "/bin/:/usr/bin/");
        assert_eq!(env.entries()[2], "TERM=xterm");
        assert_eq!(env.entries().len(), ENV_SIZE);
    }

    #[test]
    fn test_c_strings() {
        let env = Environment::initialize();
        let c_env = env.to_c_strings().unwrap();
        assert_eq!(c_env.len(), ENV_SIZE);
        assert_eq!(c_env[0].to_str().unwrap(), "SHELL=simpsh");
    }

    #[test]
    fn test_field_fits() {
        assert!(field_fits("PATH", "/usr/bin/"));
        assert!(field_fits("PATH", &"a".repeat(250)));
        assert!(!field_fits("PATH", &"a".repeat(251)));
    }
}
