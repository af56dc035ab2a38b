//! Virtual machine for executing program images.

use std::fmt;

use vehm_bytecode::{
    DecodeError, Flags, Header, Image, Instruction, Opcode, Operands, REGISTER_COUNT, Register,
    Word,
};

use super::config::VmConfig;
use super::error::{LoadError, RuntimeError};
use super::memory::{Memory, MemoryLayout};
use super::trace::{NoopTracer, Tracer};

/// Execution state. `Halted` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Program counter update after an instruction.
enum Flow {
    /// Advance by the instruction size.
    Next,
    Jump(u16),
    /// Halted; the program counter stays on the halting instruction.
    Stop,
}

/// Where a move, arithmetic or compare operand lives.
#[derive(Clone, Copy, Debug)]
enum Location {
    Register(Register),
    Memory(u16),
}

#[derive(Clone, Copy, Debug)]
enum Source {
    Location(Location),
    Immediate(Word),
}

/// Virtual machine state.
#[derive(Clone)]
pub struct VM {
    pub(crate) registers: [Word; REGISTER_COUNT],
    pub(crate) memory: Memory,
    pub(crate) layout: MemoryLayout,
    pub(crate) config: VmConfig,
    pub(crate) header: Header,
    pub(crate) state: State,
    pub(crate) instruction_count: u64,
}

/// Builder for VM instances.
pub struct VMBuilder<'i> {
    image: &'i Image,
    config: VmConfig,
}

impl<'i> VMBuilder<'i> {
    pub fn new(image: &'i Image) -> Self {
        Self {
            image,
            config: VmConfig::default(),
        }
    }

    pub fn config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config = self.config.stack_size(size);
        self
    }

    pub fn memory_size(mut self, size: usize) -> Self {
        self.config = self.config.memory_size(size);
        self
    }

    pub fn program_readonly(mut self, readonly: bool) -> Self {
        self.config = self.config.program_readonly(readonly);
        self
    }

    /// Lay out memory, copy the image in and point the program counter at
    /// the first instruction after the static segment.
    pub fn build(self) -> Result<VM, LoadError> {
        let layout = MemoryLayout::new(self.image, &self.config)?;
        let memory = Memory::load(self.image, &layout);

        let mut registers = [Word::ZERO; REGISTER_COUNT];
        registers[Register::Pc.index()] = Word::from_u16(layout.static_size as u16);

        Ok(VM {
            registers,
            memory,
            layout,
            config: self.config,
            header: *self.image.header(),
            state: State::Running,
            instruction_count: 0,
        })
    }
}

impl VM {
    pub fn builder(image: &Image) -> VMBuilder<'_> {
        VMBuilder::new(image)
    }

    /// Create a VM with the default configuration.
    pub fn new(image: &Image) -> Result<Self, LoadError> {
        Self::builder(image).build()
    }

    /// Parse image bytes and create a VM with the default configuration.
    pub fn load(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let image = Image::from_bytes(bytes)?;
        Self::new(&image)
    }

    pub fn registers(&self) -> &[Word; REGISTER_COUNT] {
        &self.registers
    }

    pub fn register(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }

    /// Overwrite a register. Intended for tests and debuggers.
    pub fn set_register(&mut self, reg: Register, value: Word) {
        self.registers[reg.index()] = value;
    }

    pub fn pc(&self) -> u16 {
        self.register(Register::Pc).as_u16()
    }

    /// Stack pointer, relative to the stack segment.
    pub fn sp(&self) -> u16 {
        self.register(Register::Sp).as_u16()
    }

    /// Stack base, relative to the stack segment.
    pub fn sb(&self) -> u16 {
        self.register(Register::Sb).as_u16()
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits(self.register(Register::Flags).as_u16())
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn program(&self) -> &[u8] {
        &self.memory.as_slice()[self.layout.program()]
    }

    pub fn stack(&self) -> &[u8] {
        &self.memory.as_slice()[self.layout.stack()]
    }

    pub fn heap(&self) -> &[u8] {
        &self.memory.as_slice()[self.layout.heap()]
    }

    /// Read a little-endian word at an absolute address.
    pub fn read_word(&self, addr: usize) -> Result<Word, RuntimeError> {
        self.memory.read16(addr)
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Instructions executed so far, halting instructions included.
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// Execute one instruction.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn step(&mut self) -> Result<State, RuntimeError> {
        self.step_with(&mut NoopTracer)
    }

    /// Execute one instruction with a tracer. A halted VM does nothing.
    pub fn step_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<State, RuntimeError> {
        if self.is_halted() {
            return Ok(State::Halted);
        }

        let pc = self.pc();
        let instr = self.fetch(pc)?;
        tracer.trace_instruction(pc, &instr);

        match self.execute(pc, instr, tracer)? {
            // Relative to the current register value, so a write to $RPC
            // still gets the instruction size added.
            Flow::Next => {
                let next = self.pc().wrapping_add(instr.size() as u16);
                self.registers[Register::Pc.index()] = Word::from_u16(next);
            }
            Flow::Jump(target) => {
                self.registers[Register::Pc.index()] = Word::from_u16(target);
            }
            Flow::Stop => {}
        }

        self.instruction_count += 1;
        Ok(self.state)
    }

    /// Execute at most `count` instructions, stopping early on halt.
    /// Returns the number executed.
    pub fn run(&mut self, count: usize) -> Result<usize, RuntimeError> {
        self.run_with(count, &mut NoopTracer)
    }

    pub fn run_with<T: Tracer>(
        &mut self,
        count: usize,
        tracer: &mut T,
    ) -> Result<usize, RuntimeError> {
        let mut executed = 0;
        while executed < count && !self.is_halted() {
            self.step_with(tracer)?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Run until the VM halts. Does not return for programs that loop forever.
    pub fn run_until_halt(&mut self) -> Result<(), RuntimeError> {
        self.run_until_halt_with(&mut NoopTracer)
    }

    pub fn run_until_halt_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        while !self.is_halted() {
            self.step_with(tracer)?;
        }
        Ok(())
    }

    fn fetch(&self, pc: u16) -> Result<Instruction, RuntimeError> {
        let executable = self.layout.executable(self.config.restrict_execution);
        let at = pc as usize;
        if !executable.contains(&at) {
            return Err(RuntimeError::OutOfBoundsExecution { pc });
        }

        let window = self.memory.slice(at..executable.end)?;
        Instruction::decode(window).map_err(|err| match err {
            DecodeError::IllegalOpcode(byte) => RuntimeError::IllegalOpcode { pc, byte },
            DecodeError::InvalidRegister(id) => RuntimeError::InvalidRegister { pc, id },
            DecodeError::Truncated { .. } | DecodeError::Empty => {
                RuntimeError::TruncatedInstruction { pc }
            }
        })
    }

    fn execute<T: Tracer>(
        &mut self,
        pc: u16,
        instr: Instruction,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        use Opcode::*;

        let flow = match (instr.opcode(), instr.operands()) {
            (Noop, _) => Flow::Next,
            (Halt, _) => {
                self.state = State::Halted;
                tracer.trace_halt(pc);
                Flow::Stop
            }
            (Ret, _) => self.ret(tracer),
            (Dup, _) => {
                let top = self.peek(2)?;
                self.push(top, tracer)?;
                Flow::Next
            }
            (Cmp, _) => {
                let lhs = self.peek(4)?;
                let rhs = self.peek(2)?;
                self.compare(lhs, rhs, tracer);
                Flow::Next
            }

            (Call, Operands::Imm(target)) => self.call(pc, target, tracer),
            (PushImm, Operands::Imm(value)) => {
                self.push(Word::from_u16(value), tracer)?;
                Flow::Next
            }
            (op, Operands::Imm(target)) => self.jump(op, target, tracer),

            (Push, Operands::Reg(reg)) => {
                self.push(self.register(reg), tracer)?;
                Flow::Next
            }
            (Pop, Operands::Reg(reg)) => {
                let value = self.pop(tracer)?;
                self.write_register(reg, value, tracer);
                Flow::Next
            }
            (Not, Operands::Reg(reg)) => {
                let value = self.register(reg).not();
                self.write_register(reg, value, tracer);
                Flow::Next
            }

            (op, Operands::RegImm(reg, imm)) => {
                let src = Source::Immediate(Word::from_u16(imm));
                self.exec_pair(pc, op, Location::Register(reg), src, tracer)?
            }
            (op, Operands::RegReg(dst, src)) => {
                let src = Source::Location(Location::Register(src));
                self.exec_pair(pc, op, Location::Register(dst), src, tracer)?
            }
            (op, Operands::RegMem(reg, addr)) => {
                let src = Source::Location(Location::Memory(addr));
                self.exec_pair(pc, op, Location::Register(reg), src, tracer)?
            }
            (op, Operands::MemReg(addr, reg)) => {
                let src = Source::Location(Location::Register(reg));
                self.exec_pair(pc, op, Location::Memory(addr), src, tracer)?
            }

            (op, operands) => unreachable!("{} decoded with {operands:?}", op.name()),
        };

        Ok(flow)
    }

    /// Moves, compares and binary operations. `dst` is the first operand.
    fn exec_pair<T: Tracer>(
        &mut self,
        pc: u16,
        op: Opcode,
        dst: Location,
        src: Source,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        let rhs = self.load_source(src)?;

        match op {
            Opcode::MovRegImm | Opcode::MovRegReg | Opcode::MovRegMem | Opcode::MovMemReg => {
                self.store(dst, rhs, tracer)
            }
            Opcode::CmpRegReg | Opcode::CmpRegMem | Opcode::CmpMemReg => {
                let lhs = self.load_location(dst)?;
                self.compare(lhs, rhs, tracer);
                Ok(Flow::Next)
            }
            op => {
                let lhs = self.load_location(dst)?;
                let result = binary_op(pc, op, lhs, rhs)?;
                self.store(dst, result, tracer)
            }
        }
    }

    fn jump<T: Tracer>(&mut self, op: Opcode, target: u16, tracer: &mut T) -> Flow {
        let flags = self.flags();
        let taken = match op {
            Opcode::Jump => true,
            Opcode::JumpEq => flags.equal(),
            Opcode::JumpNeq => !flags.equal(),
            Opcode::JumpGt => flags.greater_than(),
            Opcode::JumpLt => flags.less_than(),
            Opcode::JumpGeq => !flags.less_than(),
            Opcode::JumpLeq => !flags.greater_than(),
            _ => unreachable!("{} is not a jump", op.name()),
        };
        tracer.trace_jump(target, taken);

        if taken { Flow::Jump(target) } else { Flow::Next }
    }

    /// Save stack base, stack pointer and return address into the fixed
    /// backup registers, open a new frame at the stack pointer and jump.
    fn call<T: Tracer>(&mut self, pc: u16, target: u16, tracer: &mut T) -> Flow {
        let return_address = pc.wrapping_add(Opcode::Call.size() as u16);
        let sb = self.register(Register::Sb);
        let sp = self.register(Register::Sp);

        self.write_register(Register::SB_BACKUP, sb, tracer);
        self.write_register(Register::SP_BACKUP, sp, tracer);
        self.write_register(
            Register::RETURN_ADDRESS,
            Word::from_u16(return_address),
            tracer,
        );
        self.write_register(Register::Sb, sp, tracer);

        tracer.trace_call(target, return_address);
        Flow::Jump(target)
    }

    fn ret<T: Tracer>(&mut self, tracer: &mut T) -> Flow {
        let sb = self.register(Register::SB_BACKUP);
        let sp = self.register(Register::SP_BACKUP);
        let return_address = self.register(Register::RETURN_ADDRESS).as_u16();

        self.write_register(Register::Sb, sb, tracer);
        self.write_register(Register::Sp, sp, tracer);

        tracer.trace_return(return_address);
        Flow::Jump(return_address)
    }

    fn compare<T: Tracer>(&mut self, lhs: Word, rhs: Word, tracer: &mut T) {
        let flags = self.flags().with_ordering(lhs.compare(rhs));
        self.registers[Register::Flags.index()] = Word::from_u16(flags.bits());
        tracer.trace_compare(lhs, rhs, flags);
    }

    fn load_source(&self, src: Source) -> Result<Word, RuntimeError> {
        match src {
            Source::Immediate(value) => Ok(value),
            Source::Location(loc) => self.load_location(loc),
        }
    }

    fn load_location(&self, loc: Location) -> Result<Word, RuntimeError> {
        match loc {
            Location::Register(reg) => Ok(self.register(reg)),
            Location::Memory(addr) => self.memory.read16(addr as usize),
        }
    }

    fn store<T: Tracer>(
        &mut self,
        dst: Location,
        value: Word,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        match dst {
            Location::Register(reg) => {
                self.write_register(reg, value, tracer);
                Ok(Flow::Next)
            }
            Location::Memory(addr) => self.write_memory(addr, value, tracer),
        }
    }

    fn write_register<T: Tracer>(&mut self, reg: Register, value: Word, tracer: &mut T) {
        self.registers[reg.index()] = value;
        tracer.trace_register_write(reg, value);
    }

    /// A write touching a read-only program segment halts the VM and is
    /// discarded.
    fn write_memory<T: Tracer>(
        &mut self,
        addr: u16,
        value: Word,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        let at = addr as usize;
        if at + 2 > self.memory.len() {
            return Err(RuntimeError::MemoryOutOfBounds { addr: at });
        }
        if self.config.program_readonly && self.layout.overlaps_program(at, 2) {
            tracer.trace_illegal_write(addr, value);
            self.state = State::Halted;
            return Ok(Flow::Stop);
        }

        self.memory.write16(at, value)?;
        tracer.trace_memory_write(addr, value);
        Ok(Flow::Next)
    }

    fn push<T: Tracer>(&mut self, value: Word, tracer: &mut T) -> Result<(), RuntimeError> {
        let sp = self.sp();
        if sp as usize + 2 > self.layout.stack_size {
            return Err(RuntimeError::StackOverflow { sp });
        }

        let addr = self.layout.stack_offset + sp as usize;
        self.memory.write16(addr, value)?;
        tracer.trace_memory_write(addr as u16, value);
        self.write_register(Register::Sp, Word::from_u16(sp + 2), tracer);
        Ok(())
    }

    fn pop<T: Tracer>(&mut self, tracer: &mut T) -> Result<Word, RuntimeError> {
        let value = self.peek(2)?;
        let sp = self.sp() - 2;
        self.write_register(Register::Sp, Word::from_u16(sp), tracer);
        Ok(value)
    }

    /// Word `depth` bytes below the stack pointer.
    fn peek(&self, depth: u16) -> Result<Word, RuntimeError> {
        let sp = self.sp();
        if sp < depth {
            return Err(RuntimeError::StackUnderflow { sp });
        }
        if sp as usize > self.layout.stack_size {
            return Err(RuntimeError::StackOverflow { sp });
        }
        self.memory
            .read16(self.layout.stack_offset + (sp - depth) as usize)
    }
}

fn binary_op(pc: u16, op: Opcode, lhs: Word, rhs: Word) -> Result<Word, RuntimeError> {
    let result = match op {
        Opcode::Or => lhs.or(rhs),
        Opcode::Xor => lhs.xor(rhs),
        Opcode::And => lhs.and(rhs),
        _ => {
            let Some((arith, view)) = op.arith() else {
                unreachable!("{} is not a binary operation", op.name());
            };
            lhs.arith(arith, rhs, view)
                .ok_or(RuntimeError::DivisionByZero { pc })?
        }
    };
    Ok(result)
}

impl fmt::Debug for VM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VM")
            .field("registers", &self.registers)
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("instruction_count", &self.instruction_count)
            .finish_non_exhaustive()
    }
}
