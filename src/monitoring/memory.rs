//! Process Memory Query
//!
//! Reads the resident memory of the current process. The harness only
//! depends on the [`MemorySource`] trait, so tests and callers can inject
//! their own source.

use log::warn;
use sysinfo::{get_current_pid, Pid, ProcessRefreshKind, System};

use crate::error::HarnessError;
use crate::units::bytes_to_mb;

/// A source of resident memory readings for the current process.
pub trait MemorySource {
    /// Returns the current resident memory in megabytes.
    fn resident_mb(&mut self) -> Result<f64, HarnessError>;
}

impl<P: MemorySource + ?Sized> MemorySource for &mut P {
    fn resident_mb(&mut self) -> Result<f64, HarnessError> {
        (**self).resident_mb()
    }
}

/// Resident memory of the current process, read through `sysinfo`.
///
/// # Example
///
/// ```rust,no_run
/// use dataperf::monitoring::{MemorySource, ProcessMemory};
///
/// let mut source = ProcessMemory::new()?;
/// println!("{:.2} MB", source.resident_mb()?);
/// # Ok::<(), dataperf::HarnessError>(())
/// ```
pub struct ProcessMemory {
    system: System,
    process_id: Pid,
}

impl ProcessMemory {
    /// Creates a source for the current process.
    pub fn new() -> Result<Self, HarnessError> {
        let process_id = get_current_pid().map_err(|e| {
            warn!("Could not determine current process id: {}", e);
            HarnessError::ProcessId(e.to_string())
        })?;

        Ok(Self {
            system: System::new(),
            process_id,
        })
    }

    /// Returns the id of the process being sampled.
    pub fn pid(&self) -> u32 {
        self.process_id.as_u32()
    }
}

impl MemorySource for ProcessMemory {
    fn resident_mb(&mut self) -> Result<f64, HarnessError> {
        let pid = self.process_id;
        let refresh_kind = ProcessRefreshKind::new().with_memory();

        if !self.system.refresh_process_specifics(pid, refresh_kind) {
            warn!("Memory refresh found no process with pid {}", pid);
            return Err(HarnessError::ProcessNotFound { pid: pid.as_u32() });
        }

        match self.system.process(pid) {
            Some(process) => Ok(bytes_to_mb(process.memory())),
            None => {
                warn!("Process {} missing after memory refresh", pid);
                Err(HarnessError::ProcessNotFound { pid: pid.as_u32() })
            }
        }
    }
}

/// Reads the current process's resident memory once.
pub fn current_memory_mb() -> Result<f64, HarnessError> {
    ProcessMemory::new()?.resident_mb()
}
