use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::fd::RawFd;

use crate::{
    core::{
        config::{ShellConfig, RECOVERABLE_ERROR_STATUS},
        env::Environment,
        state::InterruptFlag,
    },
    error::ShellError,
    highlight::Highlighter,
    input::{LineReader, ReadOutcome, Tokenizer},
    process::{Executor, Outcome, SignalController},
};

/// The read, tokenize, execute loop.
pub struct Shell {
    config: ShellConfig,
    env: Environment,
    interrupt: InterruptFlag,
    reader: LineReader,
    tokenizer: Tokenizer,
    executor: Executor,
    highlighter: Highlighter,
    _signals: SignalController,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        Self::with_input(config, libc::STDIN_FILENO)
    }

    /// Reads commands from `fd` instead of stdin. The descriptor is not closed.
    pub fn with_input(config: ShellConfig, fd: RawFd) -> Result<Self, ShellError> {
        let interrupt = InterruptFlag::new();
        let signals = SignalController::install(&interrupt)?;

        Ok(Shell {
            env: Environment::from_config(&config),
            reader: LineReader::from_fd(fd, interrupt.clone()),
            tokenizer: Tokenizer::for_commands(),
            executor: Executor::new(interrupt.clone()),
            highlighter: Highlighter::new(),
            interrupt,
            config,
            _signals: signals,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Runs until end-of-input or `exit`, returning the code the process
    /// should exit with. Fatal errors are handed back untouched.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        loop {
            self.prompt()?;
            self.interrupt.clear();

            let line = match self.reader.read_line() {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) => continue,
                Ok(ReadOutcome::Eof) => {
                    self.farewell()?;
                    return Ok(0);
                }
                Err(e) => {
                    self.recover(e.into())?;
                    continue;
                }
            };

            if self.interrupt.is_set() {
                continue;
            }

            if let Some(code) = self.step(&line)? {
                return Ok(code);
            }
        }
    }

    /// Runs one line. Returns `Some(code)` when the shell should terminate.
    pub fn step(&mut self, line: impl AsRef<OsStr>) -> Result<Option<i32>, ShellError> {
        match self.execute_line(line.as_ref()) {
            Ok(Outcome::Exit(code)) => return Ok(Some(code)),
            Ok(outcome) => {
                if let Some(status) = outcome.status() {
                    self.env.record_status(status);
                }
            }
            Err(e) => self.recover(e)?,
        }
        Ok(None)
    }

    fn execute_line(&self, line: &OsStr) -> Result<Outcome, ShellError> {
        let command = self.tokenizer.tokenize(line)?;
        log::debug!("tokenized {:?}", command);
        Ok(self.executor.execute(&command, &self.env)?)
    }

    /// Reports a recoverable error and records its status; fatal ones pass through.
    fn recover(&mut self, err: ShellError) -> Result<(), ShellError> {
        if err.is_fatal() {
            return Err(err);
        }
        self.highlighter.report(&err);
        self.env.record_status(RECOVERABLE_ERROR_STATUS);
        Ok(())
    }

    fn prompt(&self) -> Result<(), ShellError> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", self.config.prompt)?;
        stdout.flush()?;
        Ok(())
    }

    fn farewell(&self) -> Result<(), ShellError> {
        let mut stdout = io::stdout();
        writeln!(stdout, "\nexit")?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::fd::{AsRawFd, FromRawFd};

    fn config() -> ShellConfig {
        ShellConfig {
            search_path: "/usr/bin/:/bin/".to_string(),
            ..ShellConfig::default()
        }
    }

    fn pipe_with(data: &str) -> File {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let (read_end, mut write_end) =
            unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) };
        write_end.write_all(data.as_bytes()).unwrap();
        read_end
    }

    fn run_script(script: &str) -> (Result<i32, ShellError>, Environment) {
        let source = pipe_with(script);
        let mut shell = Shell::with_input(config(), source.as_raw_fd()).unwrap();
        let result = shell.run();
        (result, shell.environment().clone())
    }

    #[test]
    fn test_eof_exits_zero() {
        let (result, env) = run_script("");
        assert_eq!(result.unwrap(), 0);
        assert_eq!(env.status(), None);
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(run_script("exit\n").0.unwrap(), 0);
        assert_eq!(run_script("exit 7\n").0.unwrap(), 7);
    }

    #[test]
    fn test_exit_garbage_is_fatal() {
        let (result, _) = run_script("exit abc\nexit 0\n");
        assert!(result.unwrap_err().is_fatal());
    }

    #[test]
    fn test_status_is_recorded() {
        let (result, env) = run_script("sh -c true\nfalse\n");
        assert_eq!(result.unwrap(), 0);
        assert_eq!(env.status(), Some(1));
        assert_eq!(env.entries()[3], "?=1");
    }

    #[test]
    fn test_unknown_command_keeps_running() {
        let (result, env) = run_script("simpsh-no-such-command\nexit 5\n");
        assert_eq!(result.unwrap(), 5);
        assert_eq!(env.status(), Some(255));
    }

    #[test]
    fn test_empty_line_records_nothing() {
        let mut shell = Shell::with_input(config(), -1).unwrap();
        assert_eq!(shell.step("false").unwrap(), None);
        assert_eq!(shell.step("   ").unwrap(), None);
        assert_eq!(shell.environment().status(), Some(1));
    }

    #[test]
    fn test_recoverable_parse_error() {
        let mut shell = Shell::with_input(config(), -1).unwrap();
        assert_eq!(shell.step("cat <").unwrap(), None);
        assert_eq!(shell.environment().status(), Some(RECOVERABLE_ERROR_STATUS));
    }

    #[test]
    fn test_third_redirection_is_fatal() {
        let (result, _) = run_script("cat < a > b > c\nexit 0\n");
        assert!(matches!(
            result,
            Err(ShellError::Input(crate::input::InputError::TooManyRedirections))
        ));
    }

    #[test]
    fn test_long_line_is_skipped() {
        let script = format!("{}\nexit 2\n", "x".repeat(400));
        let (result, env) = run_script(&script);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(env.status(), Some(RECOVERABLE_ERROR_STATUS));
    }
}
