use std::io;
use std::os::raw::c_int;
use std::ptr;

use libc::SIGINT;
use signal_hook::SigId;

use super::ProcessError;
use crate::core::state::InterruptFlag;

/// Owns the SIGINT registration for the lifetime of the shell.
///
/// The handler raises the interrupt flag, writes a newline with a raw
/// `write(2)` and reaps every child that has already terminated. It never
/// waits on the foreground child; the main loop polls the flag instead.
pub struct SignalController {
    id: SigId,
}

impl SignalController {
    pub fn install(interrupt: &InterruptFlag) -> Result<Self, ProcessError> {
        let flag = interrupt.clone();
        let id = unsafe { signal_hook::low_level::register(SIGINT, move || on_interrupt(&flag)) }
            .map_err(ProcessError::SignalInstall)?;

        // Blocking read(2)/waitpid(2) must return EINTR so the flag gets looked at.
        if let Err(e) = disable_restart(SIGINT) {
            signal_hook::low_level::unregister(id);
            return Err(ProcessError::SignalInstall(e));
        }

        log::debug!("SIGINT handler installed");
        Ok(Self { id })
    }
}

impl Drop for SignalController {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}

fn on_interrupt(flag: &InterruptFlag) {
    flag.raise();

    const NEWLINE: &[u8] = b"\n";
    unsafe {
        libc::write(libc::STDOUT_FILENO, NEWLINE.as_ptr().cast(), NEWLINE.len());
    }

    reap_terminated();
}

/// Collects every terminated child without blocking. Async-signal-safe.
pub fn reap_terminated() -> usize {
    let mut reaped = 0;
    while unsafe { libc::waitpid(-1, ptr::null_mut(), libc::WNOHANG) } > 0 {
        reaped += 1;
    }
    reaped
}

fn disable_restart(signal: c_int) -> io::Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        if libc::sigaction(signal, ptr::null(), &mut action) != 0 {
            return Err(io::Error::last_os_error());
        }
        action.sa_flags &= !libc::SA_RESTART;
        if libc::sigaction(signal, &action, ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}
