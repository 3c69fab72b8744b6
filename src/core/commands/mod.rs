use std::ffi::{OsStr, OsString};
use std::fmt;

mod exit;

pub use exit::ExitCommand;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// What the shell has to do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAction {
    Exit(i32),
}

pub trait Command {
    fn execute(&self, args: &[OsString]) -> Result<BuiltinAction, CommandError>;
}

#[derive(Debug, Clone)]
pub enum Builtin {
    Exit(ExitCommand),
}

impl Builtin {
    pub fn lookup(name: &OsStr) -> Option<Self> {
        match name.to_str()? {
            "exit" => Some(Builtin::Exit(ExitCommand::new())),
            _ => None,
        }
    }
}

impl Command for Builtin {
    fn execute(&self, args: &[OsString]) -> Result<BuiltinAction, CommandError> {
        match self {
            Builtin::Exit(cmd) => cmd.execute(args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_detection() {
        for (name, found) in [("exit", true), ("cd", false), ("", false), ("EXIT", false)] {
            assert_eq!(Builtin::lookup(OsStr::new(name)).is_some(), found, "{}", name);
        }
    }

    #[test]
    fn test_dispatch() {
        let builtin = Builtin::lookup(OsStr::new("exit")).unwrap();
        assert_eq!(
            builtin.execute(&["3".into()]).unwrap(),
            BuiltinAction::Exit(3)
        );
    }
}
