use std::ffi::{CString, OsString};
use std::io;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

use super::sys::{self, CStringArray, ForkResult, Pid, WaitStatus};
use super::ProcessError;
use crate::core::commands::{Builtin, BuiltinAction, Command};
use crate::core::config::{
    EXEC_FAILURE_STATUS, INTERRUPTED_STATUS, NOT_FOUND_STATUS, NO_OP_STATUS,
    REDIRECT_FAILURE_STATUS,
};
use crate::core::env::Environment;
use crate::core::state::InterruptFlag;
use crate::highlight::Highlighter;
use crate::input::{CommandLine, Direction, Redirection};
use crate::path::{is_bare, PathResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to run.
    NoOp,
    /// The foreground child exited normally with this code.
    Exited(i32),
    /// An interrupt was pending, so no fork or no wait happened.
    Interrupted,
    /// The `exit` builtin asked the shell to terminate.
    Exit(i32),
}

impl Outcome {
    /// Raw status code, `255` for a no-op.
    pub fn code(&self) -> i32 {
        match *self {
            Outcome::NoOp => NO_OP_STATUS,
            Outcome::Exited(code) | Outcome::Exit(code) => code,
            Outcome::Interrupted => INTERRUPTED_STATUS,
        }
    }

    /// The status the main loop should record, if any.
    pub fn status(&self) -> Option<i32> {
        match self {
            Outcome::Exited(_) | Outcome::Interrupted => Some(self.code()),
            Outcome::NoOp | Outcome::Exit(_) => None,
        }
    }
}

/// Everything `execve` needs, converted before the fork.
struct ProgramImage {
    name: OsString,
    argv: CStringArray,
    envp: CStringArray,
}

impl ProgramImage {
    fn new(line: &CommandLine, env: &Environment) -> Result<Self, ProcessError> {
        let argv = line
            .argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(arg.to_string_lossy().into_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let envp = env
            .to_c_strings()
            .map_err(|e| ProcessError::InvalidArgument(e.to_string()))?;

        Ok(Self {
            name: line.argv.first().cloned().unwrap_or_default(),
            argv: CStringArray::new(argv),
            envp: CStringArray::new(envp),
        })
    }
}

pub struct Executor {
    interrupt: InterruptFlag,
    highlighter: Highlighter,
}

impl Executor {
    pub fn new(interrupt: InterruptFlag) -> Self {
        Self {
            interrupt,
            highlighter: Highlighter::new(),
        }
    }

    pub fn execute(&self, line: &CommandLine, env: &Environment) -> Result<Outcome, ProcessError> {
        let Some(program) = line.program() else {
            return Ok(Outcome::NoOp);
        };

        if let Some(builtin) = Builtin::lookup(program) {
            return match builtin.execute(line.args())? {
                BuiltinAction::Exit(code) => Ok(Outcome::Exit(code)),
            };
        }

        if self.interrupt.is_set() {
            return Ok(Outcome::Interrupted);
        }

        let image = ProgramImage::new(line, env)?;
        match sys::fork().map_err(ProcessError::Fork)? {
            ForkResult::Child => self.run_child(image, &line.redirection, env.search_path()),
            ForkResult::Parent(pid) => {
                log::debug!("forked {} for {:?}", pid, program);
                self.wait_for(pid)
            }
        }
    }

    fn wait_for(&self, pid: Pid) -> Result<Outcome, ProcessError> {
        loop {
            if self.interrupt.is_set() {
                log::debug!("interrupt pending, not waiting for {}", pid);
                return Ok(Outcome::Interrupted);
            }

            match sys::wait_pid(pid) {
                Ok(WaitStatus::Exited(code)) => return Ok(Outcome::Exited(code)),
                Ok(WaitStatus::Signaled(signal)) | Ok(WaitStatus::Other(signal)) => {
                    if self.interrupt.is_set() {
                        return Ok(Outcome::Interrupted);
                    }
                    return Err(ProcessError::AbnormalTermination { pid, signal });
                }
                // The handler may already have reaped the child.
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.raw_os_error() == Some(libc::ECHILD) && self.interrupt.is_set() => {
                    return Ok(Outcome::Interrupted)
                }
                Err(e) => return Err(ProcessError::Wait(e)),
            }
        }
    }

    /// Diagnostics from the child bypass the stderr lock.
    fn child_report(&self, message: impl std::fmt::Display) {
        sys::write_stderr(&self.highlighter.render(message));
    }

    fn run_child(&self, image: ProgramImage, redirection: &Redirection, search_path: &str) -> ! {
        sys::restore_default_signals();

        if let Err(e) = apply_redirection(redirection) {
            self.child_report(e);
            sys::exit_child(REDIRECT_FAILURE_STATUS);
        }

        let Some(path) = image.argv.first() else {
            sys::exit_child(NO_OP_STATUS);
        };
        let err = sys::execve(path, &image.argv, &image.envp);

        if err.kind() != io::ErrorKind::NotFound || !is_bare(&image.name) {
            self.child_report(format_args!("{}: {}", image.name.to_string_lossy(), err));
            sys::exit_child(EXEC_FAILURE_STATUS);
        }

        let resolved = PathResolver::new(search_path).and_then(|resolver| resolver.resolve(&image.name));
        match resolved {
            Ok(resolved) => {
                if let Ok(path) = CString::new(resolved.clone().into_os_string().into_vec()) {
                    let err = sys::execve(&path, &image.argv, &image.envp);
                    self.child_report(format_args!("{}: {}", resolved.display(), err));
                }
            }
            Err(e) => self.child_report(e),
        }

        drop(image);
        sys::exit_child(NOT_FOUND_STATUS)
    }
}

fn apply_redirection(redirection: &Redirection) -> Result<(), ProcessError> {
    let targets: Vec<(&Path, Direction)> = match redirection {
        Redirection::None => Vec::new(),
        Redirection::Input(input) => vec![(Path::new(input), Direction::Input)],
        Redirection::Output(output) => vec![(Path::new(output), Direction::Output)],
        Redirection::Both { input, output } => {
            vec![(Path::new(input), Direction::Input), (Path::new(output), Direction::Output)]
        }
    };

    for (target, direction) in targets {
        sys::redirect(target, direction).map_err(|source| ProcessError::Redirect {
            target: target.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
