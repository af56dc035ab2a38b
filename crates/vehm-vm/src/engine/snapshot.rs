//! Deep copies of VM state for save and restore.

use vehm_bytecode::{REGISTER_COUNT, Word};

use super::config::VmConfig;
use super::memory::{Memory, MemoryLayout};
use super::vm::{State, VM};

/// Registers, memory, layout and execution state of a VM at one point.
///
/// Restoring a snapshot into a VM makes it behave exactly as the captured
/// VM would from that point on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    registers: [Word; REGISTER_COUNT],
    memory: Memory,
    layout: MemoryLayout,
    config: VmConfig,
    state: State,
    instruction_count: u64,
}

impl Snapshot {
    pub fn capture(vm: &VM) -> Self {
        Self {
            registers: vm.registers,
            memory: vm.memory.clone(),
            layout: vm.layout,
            config: vm.config,
            state: vm.state,
            instruction_count: vm.instruction_count,
        }
    }

    /// Overwrite `vm` with the captured state. The image header is kept.
    pub fn restore(&self, vm: &mut VM) {
        vm.registers = self.registers;
        vm.memory = self.memory.clone();
        vm.layout = self.layout;
        vm.config = self.config;
        vm.state = self.state;
        vm.instruction_count = self.instruction_count;
    }

    pub fn registers(&self) -> &[Word; REGISTER_COUNT] {
        &self.registers
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }
}

impl VM {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        snapshot.restore(self);
    }
}
