use core_abi::{CoreFault, CpuSnapshot};
use inspector_vm::InspectorVM;

/// State container for the inspector view-model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InspectorState {
    /// Latest inspector view-model snapshot.
    pub vm: InspectorVM,
    /// Number of debug refreshes published.
    pub refreshes: u64,
}

impl InspectorState {
    /// Construct a fresh inspector state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes one debug refresh: registers plus the memory window.
    pub fn publish(&mut self, snapshot: &CpuSnapshot, base: u16, window: &[u8]) {
        self.vm.apply_snapshot(snapshot);
        self.vm.apply_window(base, window);
        self.refreshes = self.refreshes.saturating_add(1);
    }

    /// Records a core fault in the view-model.
    pub fn apply_fault(&mut self, fault: &CoreFault) {
        self.vm.apply_fault(fault);
    }

    /// Synchronize world performance counters into the inspector view.
    pub fn sync_perf(&mut self, perf: &crate::world::WorldPerf) {
        self.vm.perf.ticks = perf.ticks;
        self.vm.perf.frames = perf.frames;
        self.vm.perf.instructions = perf.instructions;
        self.vm.perf.faults = perf.faults;
    }
}
