use std::ffi::OsString;

use super::{BuiltinAction, Command, CommandError};

/// `exit [code]`: leave the shell, with status 0 unless a code is given.
#[derive(Debug, Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, args: &[OsString]) -> Result<BuiltinAction, CommandError> {
        let Some(code) = args.first() else {
            return Ok(BuiltinAction::Exit(0));
        };

        let code = code.to_string_lossy();
        code.parse::<i32>()
            .map(BuiltinAction::Exit)
            .map_err(|e| CommandError::InvalidArguments(format!("exit: {}: {}", code, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<BuiltinAction, CommandError> {
        let args: Vec<OsString> = args.iter().map(OsString::from).collect();
        ExitCommand::new().execute(&args)
    }

    #[test]
    fn test_exit_without_code() {
        assert_eq!(run(&[]).unwrap(), BuiltinAction::Exit(0));
    }

    #[test]
    fn test_exit_with_code() {
        assert_eq!(run(&["7"]).unwrap(), BuiltinAction::Exit(7));
        assert_eq!(run(&["-2"]).unwrap(), BuiltinAction::Exit(-2));
        assert_eq!(run(&["+4"]).unwrap(), BuiltinAction::Exit(4));
    }

    #[test]
    fn test_exit_with_undecodable_code() {
        use std::os::unix::ffi::OsStringExt;

        let args = [OsString::from_vec(b"4\xff".to_vec())];
        assert!(matches!(
            ExitCommand::new().execute(&args),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_extra_arguments_ignored() {
        assert_eq!(run(&["5", "9"]).unwrap(), BuiltinAction::Exit(5));
    }

    #[test]
    fn test_exit_with_garbage() {
        assert!(matches!(run(&["abc"]), Err(CommandError::InvalidArguments(_))));
        assert!(matches!(run(&["7abc"]), Err(CommandError::InvalidArguments(_))));
        assert!(matches!(
            run(&["99999999999"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}
