use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();
        let mut add = |name: &str, short: &str, long: &str, description: &str, takes_value| {
            flags.insert(
                name.to_string(),
                Flag {
                    short: short.to_string(),
                    long: long.to_string(),
                    description: description.to_string(),
                    takes_value,
                    value: None,
                },
            );
        };

        add("help", "-h", "--help", "Print this help message", false);
        add("version", "-v", "--version", "Show version information", false);
        add("debug", "-d", "--debug", "Enable debug logging", false);
        add("config", "-c", "--config", "Read settings from this file instead of ~/.simpshrc", true);

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            for flag in self.flags.values_mut() {
                if arg == &flag.short || arg == &flag.long {
                    if flag.takes_value {
                        let Some(value) = args.get(i + 1) else {
                            return Err(ShellError::FlagError(format!(
                                "Flag {} requires a value",
                                arg
                            )));
                        };
                        flag.value = Some(value.clone());
                        i += 1;
                    } else {
                        flag.value = Some("true".to_string());
                    }
                }
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: simpsh [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}
