use std::{fs, path::Path};

use super::{ConfigError, ConfigPaths, ShellConfig};
use crate::core::env::field_fits;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, config: &mut ShellConfig) -> Result<(), ConfigError> {
        let Some(path) = self.paths.rc_path() else {
            log::debug!("no home directory, using built-in defaults");
            return Ok(());
        };

        if !path.exists() {
            if self.paths.is_required() {
                return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
            }
            log::debug!("{} not present, using built-in defaults", path.display());
            return Ok(());
        }

        self.source(path, config)
    }

    fn source(&self, path: &Path, config: &mut ShellConfig) -> Result<(), ConfigError> {
        log::debug!("loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, config)?;
        }
        Ok(())
    }

    fn process_line(
        &self,
        number: usize,
        line: &str,
        config: &mut ShellConfig,
    ) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let assignment = line.strip_prefix("export ").unwrap_or(line);
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(ConfigError::MalformedLine(number, line.to_string()));
        };
        let name = name.trim();
        let value = strip_quotes(value.trim());

        match name {
            "PROMPT" => config.prompt = value.to_string(),
            "PATH" => config.search_path = checked_field(name, value)?,
            "TERM" => config.term = checked_field(name, value)?,
            _ => log::warn!("ignoring unknown configuration key {} on line {}", name, number),
        }
        Ok(())
    }
}

fn checked_field(name: &str, value: &str) -> Result<String, ConfigError> {
    if field_fits(name, value) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::FieldTooLong(name.to_string()))
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
