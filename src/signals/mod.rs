//! Interrupt coordination and the registry of live encoder subprocesses

use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::{MovpressError, MovpressResult};

/// Shared handle to one running encoder subprocess
pub type ProcessHandle = Arc<Mutex<Child>>;

/// Registry of all encoder subprocesses currently running
///
/// Owned by the batch runner and injected into each session and the signal
/// coordinator rather than reached globally. Handles are appended on launch
/// and never removed; the set is bounded by the batch size because the
/// batch runs one session at a time.
#[derive(Clone, Default)]
pub struct ActiveProcessSet {
    processes: Arc<Mutex<Vec<ProcessHandle>>>,
    cancelled: Arc<AtomicBool>,
}

impl ActiveProcessSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly launched subprocess. Called before the first read
    /// from its diagnostic stream so an interrupt arriving mid-launch can
    /// still reach it.
    pub fn register(&self, handle: ProcessHandle) {
        if let Ok(mut processes) = self.processes.lock() {
            processes.push(handle);
        }
    }

    /// Flag the batch as cancelled. Checked cooperatively by the runner
    /// between files and by sessions when their stream closes.
    pub fn request_cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Terminate and reap every registered subprocess.
    ///
    /// Safe to call more than once and safe against processes that already
    /// exited: at-least-once termination attempts are acceptable, so errors
    /// from killing a reaped child are ignored.
    pub fn terminate_all(&self) {
        let handles: Vec<ProcessHandle> = match self.processes.lock() {
            Ok(processes) => processes.clone(),
            Err(_) => {
                warn!("Process registry lock poisoned; skipping termination pass");
                return;
            }
        };

        for handle in handles {
            if let Ok(mut child) = handle.lock() {
                debug!("Terminating encoder process {}", child.id());
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

/// Installs the interrupt handler for the duration of a batch run
///
/// Receipt of the interrupt sets the cancellation flag and terminates
/// whatever is currently in the process registry; the interrupted read
/// loop then observes its stream closing and unwinds the batch as a
/// cancellation rather than an error. A second interrupt stops waiting
/// on children and exits immediately.
pub struct SignalCoordinator;

impl SignalCoordinator {
    pub fn install(processes: ActiveProcessSet) -> MovpressResult<()> {
        ctrlc::set_handler(move || {
            if processes.is_cancelled() {
                std::process::exit(130);
            }
            processes.request_cancel();
            processes.terminate_all();
        })
        .map_err(|e| {
            MovpressError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("failed to install interrupt handler: {}", e),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    fn spawn_long_running() -> ProcessHandle {
        let child = Command::new("sleep")
            .arg("30")
            .stdout(Stdio::null())
            .spawn()
            .expect("spawn sleep");
        Arc::new(Mutex::new(child))
    }

    #[test]
    fn cancel_flag_round_trip() {
        let set = ActiveProcessSet::new();
        assert!(!set.is_cancelled());
        set.request_cancel();
        assert!(set.is_cancelled());
        // Clones observe the same flag
        assert!(set.clone().is_cancelled());
    }

    #[test]
    fn terminate_all_reaps_registered_process() {
        let set = ActiveProcessSet::new();
        let handle = spawn_long_running();
        set.register(Arc::clone(&handle));

        set.terminate_all();

        let mut child = handle.lock().unwrap();
        let status = child.wait().expect("terminated process has a status");
        assert!(!status.success());
    }

    #[test]
    fn terminate_all_is_idempotent() {
        let set = ActiveProcessSet::new();
        set.register(spawn_long_running());

        set.terminate_all();
        // Second pass hits an already-reaped child and must not panic
        set.terminate_all();
    }

    #[test]
    fn terminate_all_with_empty_registry_is_a_no_op() {
        ActiveProcessSet::new().terminate_all();
    }
}
