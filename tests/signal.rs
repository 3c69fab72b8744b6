//! The SIGINT handler runs in this process, so it gets its own test binary.

use std::ptr;
use std::thread;
use std::time::Duration;

use simpsh::core::state::InterruptFlag;
use simpsh::process::sys::{exit_child, fork, ForkResult, Pid};
use simpsh::process::SignalController;

fn spawn_exiting(code: i32) -> Pid {
    match fork().unwrap() {
        ForkResult::Child => exit_child(code),
        ForkResult::Parent(pid) => pid,
    }
}

fn spawn_sleeping() -> Pid {
    match fork().unwrap() {
        ForkResult::Child => {
            unsafe { libc::sleep(30) };
            exit_child(0)
        }
        ForkResult::Parent(pid) => pid,
    }
}

#[test]
fn interrupt_reaps_every_terminated_child() {
    let finished = [spawn_exiting(0), spawn_exiting(3)];
    let running = spawn_sleeping();
    thread::sleep(Duration::from_millis(300));

    let interrupt = InterruptFlag::new();
    let signals = SignalController::install(&interrupt).unwrap();
    assert_eq!(unsafe { libc::raise(libc::SIGINT) }, 0);
    assert!(interrupt.is_set());

    for pid in finished {
        let result = unsafe { libc::waitpid(pid, ptr::null_mut(), libc::WNOHANG) };
        assert_eq!(result, -1, "child {} was not reaped", pid);
        assert_eq!(
            std::io::Error::last_os_error().raw_os_error(),
            Some(libc::ECHILD)
        );
    }

    // Still running, so left alone.
    assert_eq!(
        unsafe { libc::waitpid(running, ptr::null_mut(), libc::WNOHANG) },
        0
    );

    unsafe {
        libc::kill(running, libc::SIGKILL);
        libc::waitpid(running, ptr::null_mut(), 0);
    }
    drop(signals);
}
