use core_abi::CoreFault;
use log::error;

/// Receiver for faults the pump absorbs instead of propagating.
pub trait Diagnostics {
    /// Called once per fault, on the tick that observed it.
    fn core_fault(&mut self, tick: u64, fault: &CoreFault);
}

/// Forwards faults to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn core_fault(&mut self, tick: u64, fault: &CoreFault) {
        error!("tick {tick}: {fault}; playback paused");
    }
}

/// Keeps every reported fault, for tests and headless hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingDiagnostics {
    pub faults: Vec<(u64, CoreFault)>,
}

impl Diagnostics for RecordingDiagnostics {
    fn core_fault(&mut self, tick: u64, fault: &CoreFault) {
        self.faults.push((tick, fault.clone()));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn core_fault(&mut self, tick: u64, fault: &CoreFault) {
        (**self).core_fault(tick, fault);
    }
}
