//! Thin wrappers over the libc process primitives the executor needs.

use std::ffi::{CStr, CString};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{AsRawFd, RawFd};
use std::os::raw::c_char;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::ptr;

use crate::input::Direction;

pub type Pid = libc::pid_t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    Child,
    Parent(Pid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Exited(i32),
    Signaled(i32),
    Other(i32),
}

/// Owned C strings plus the NULL-terminated pointer array `execve` wants.
#[derive(Debug)]
pub struct CStringArray {
    items: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CStringArray {
    pub fn new(items: Vec<CString>) -> Self {
        let mut ptrs: Vec<*const c_char> = items.iter().map(|item| item.as_ptr()).collect();
        ptrs.push(ptr::null());
        Self { items, ptrs }
    }

    pub fn first(&self) -> Option<&CStr> {
        self.items.first().map(CString::as_c_str)
    }

    fn as_ptr(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }
}

pub fn fork() -> io::Result<ForkResult> {
    match unsafe { libc::fork() } {
        -1 => Err(io::Error::last_os_error()),
        0 => Ok(ForkResult::Child),
        pid => Ok(ForkResult::Parent(pid)),
    }
}

/// Blocks until `pid` changes state. Returns `EINTR` if a signal lands first.
pub fn wait_pid(pid: Pid) -> io::Result<WaitStatus> {
    let mut status = 0;
    if unsafe { libc::waitpid(pid, &mut status, 0) } < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(if libc::WIFEXITED(status) {
        WaitStatus::Exited(libc::WEXITSTATUS(status))
    } else if libc::WIFSIGNALED(status) {
        WaitStatus::Signaled(libc::WTERMSIG(status))
    } else {
        WaitStatus::Other(status)
    })
}

/// Replaces the process image. Only returns on failure.
pub fn execve(path: &CStr, argv: &CStringArray, envp: &CStringArray) -> io::Error {
    unsafe { libc::execve(path.as_ptr(), argv.as_ptr(), envp.as_ptr()) };
    io::Error::last_os_error()
}

/// Points stdin or stdout at `target`. Output files are created or truncated
/// with owner read/write permission.
pub fn redirect(target: &Path, direction: Direction) -> io::Result<()> {
    let (file, fd): (File, RawFd) = match direction {
        Direction::Input => (File::open(target)?, libc::STDIN_FILENO),
        Direction::Output => (
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(target)?,
            libc::STDOUT_FILENO,
        ),
    };

    if unsafe { libc::dup2(file.as_raw_fd(), fd) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Puts SIGPIPE back to its default action. The Rust runtime ignores it in
/// the shell, and an ignored disposition would survive `execve`.
pub fn restore_default_signals() {
    unsafe { libc::signal(libc::SIGPIPE, libc::SIG_DFL) };
}

/// Writes straight to fd 2 without taking the stderr lock, which another
/// thread of the parent may have held at fork time.
pub fn write_stderr(message: &str) {
    let mut rest = message.as_bytes();
    while !rest.is_empty() {
        let n = unsafe { libc::write(libc::STDERR_FILENO, rest.as_ptr().cast(), rest.len()) };
        if n <= 0 {
            break;
        }
        rest = &rest[n as usize..];
    }
}

/// Leaves a forked child without running the parent's exit handlers.
pub fn exit_child(code: i32) -> ! {
    unsafe { libc::_exit(code) }
}
