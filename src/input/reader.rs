use std::ffi::OsString;
use std::io;
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStringExt;

use super::InputError;
use crate::core::config::LINE_CAPACITY;
use crate::core::state::InterruptFlag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The raw bytes of the line, newline stripped.
    Line(OsString),
    /// An interrupt arrived while waiting; whatever was typed is dropped.
    Interrupted,
    Eof,
}

/// Reads one line at a time straight from a file descriptor.
///
/// Bytes are pulled one at a time so nothing past the newline is consumed;
/// children inherit the same descriptor and must see the rest of the input.
pub struct LineReader {
    fd: RawFd,
    capacity: usize,
    interrupt: InterruptFlag,
}

impl LineReader {
    pub fn stdin(interrupt: InterruptFlag) -> Self {
        Self::from_fd(libc::STDIN_FILENO, interrupt)
    }

    /// The descriptor stays owned by the caller.
    pub fn from_fd(fd: RawFd, interrupt: InterruptFlag) -> Self {
        Self {
            fd,
            capacity: LINE_CAPACITY,
            interrupt,
        }
    }

    /// Longest line content accepted, newline excluded.
    pub fn max_line_len(&self) -> usize {
        self.capacity - 1
    }

    pub fn read_line(&mut self) -> Result<ReadOutcome, InputError> {
        let mut line = Vec::with_capacity(self.capacity);
        let mut overflow = false;

        loop {
            if self.interrupt.is_set() {
                return Ok(ReadOutcome::Interrupted);
            }

            match self.read_byte() {
                Ok(Some(b'\n')) => break,
                Ok(Some(byte)) => {
                    if line.len() < self.max_line_len() {
                        line.push(byte);
                    } else {
                        overflow = true;
                    }
                }
                Ok(None) if line.is_empty() && !overflow => return Ok(ReadOutcome::Eof),
                Ok(None) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    if self.interrupt.is_set() {
                        log::debug!("read abandoned by interrupt");
                        return Ok(ReadOutcome::Interrupted);
                    }
                }
                Err(e) => return Err(InputError::Read(e)),
            }
        }

        if overflow {
            return Err(InputError::LineTooLong(self.max_line_len()));
        }

        Ok(ReadOutcome::Line(OsString::from_vec(line)))
    }

    fn read_byte(&self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => Err(io::Error::last_os_error()),
        }
    }
}
