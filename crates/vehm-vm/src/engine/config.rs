//! VM configuration.

/// Full 16-bit address space.
pub const MAX_MEMORY_SIZE: usize = 0x10000;
pub const DEFAULT_STACK_SIZE: usize = 4096;

/// Memory and protection settings, fixed when the VM is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VmConfig {
    /// Total memory in bytes (default: 0x10000).
    pub(crate) memory_size: usize,
    /// Stack segment size in bytes (default: 4096).
    pub(crate) stack_size: usize,
    /// Writes into the program segment halt the VM (default: true).
    pub(crate) program_readonly: bool,
    /// Refuse to execute inside the static segment (default: true).
    pub(crate) restrict_execution: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            memory_size: MAX_MEMORY_SIZE,
            stack_size: DEFAULT_STACK_SIZE,
            program_readonly: true,
            restrict_execution: true,
        }
    }
}

impl VmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory_size(mut self, size: usize) -> Self {
        self.memory_size = size;
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    pub fn program_readonly(mut self, readonly: bool) -> Self {
        self.program_readonly = readonly;
        self
    }

    pub fn restrict_execution(mut self, restrict: bool) -> Self {
        self.restrict_execution = restrict;
        self
    }

    pub fn get_memory_size(&self) -> usize {
        self.memory_size
    }
    pub fn get_stack_size(&self) -> usize {
        self.stack_size
    }
    pub fn is_program_readonly(&self) -> bool {
        self.program_readonly
    }
    pub fn is_execution_restricted(&self) -> bool {
        self.restrict_execution
    }
}
