//! Tracing infrastructure for debugging VM execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over [`Tracer`]. With `NoopTracer` every hook is an
//! `#[inline(always)]` empty function and the calls compile away; no tracing
//! state lives in the VM itself.
//!
//! `PrintTracer` collects human-readable lines for `vehm run --trace`.

use vehm_bytecode::{Colors, Flags, Instruction, Register, Word};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Instructions, calls, returns and halts.
    #[default]
    Default,
    /// Also register and memory writes, comparisons and branch decisions.
    Verbose,
}

/// Hooks called by the VM while it executes.
pub trait Tracer {
    /// Before executing the instruction at `pc`.
    fn trace_instruction(&mut self, pc: u16, instr: &Instruction);

    fn trace_register_write(&mut self, reg: Register, value: Word);

    fn trace_memory_write(&mut self, addr: u16, value: Word);

    /// A write into the read-only program segment was discarded.
    fn trace_illegal_write(&mut self, addr: u16, value: Word);

    /// After a comparison set the flags.
    fn trace_compare(&mut self, lhs: Word, rhs: Word, flags: Flags);

    /// After a jump instruction decided whether to branch.
    fn trace_jump(&mut self, target: u16, taken: bool);

    fn trace_call(&mut self, target: u16, return_address: u16);

    fn trace_return(&mut self, return_address: u16);

    fn trace_halt(&mut self, pc: u16);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _pc: u16, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_register_write(&mut self, _reg: Register, _value: Word) {}

    #[inline(always)]
    fn trace_memory_write(&mut self, _addr: u16, _value: Word) {}

    #[inline(always)]
    fn trace_illegal_write(&mut self, _addr: u16, _value: Word) {}

    #[inline(always)]
    fn trace_compare(&mut self, _lhs: Word, _rhs: Word, _flags: Flags) {}

    #[inline(always)]
    fn trace_jump(&mut self, _target: u16, _taken: bool) {}

    #[inline(always)]
    fn trace_call(&mut self, _target: u16, _return_address: u16) {}

    #[inline(always)]
    fn trace_return(&mut self, _return_address: u16) {}

    #[inline(always)]
    fn trace_halt(&mut self, _pc: u16) {}
}

/// Tracer that collects execution trace lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    colors: Colors,
}

/// Sub-lines are indented past the `0xHHHH  ` address column.
const SUB_INDENT: &str = "        ";

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all collected lines to stdout.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    fn sub_line(&mut self, text: String) {
        let c = self.colors;
        self.lines
            .push(format!("{SUB_INDENT}{}{text}{}", c.dim, c.reset));
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, pc: u16, instr: &Instruction) {
        let c = self.colors;
        self.lines
            .push(format!("{}0x{pc:04X}{}  {instr}", c.dim, c.reset));
    }

    fn trace_register_write(&mut self, reg: Register, value: Word) {
        if self.verbose() {
            self.sub_line(format!("{reg} = {value}"));
        }
    }

    fn trace_memory_write(&mut self, addr: u16, value: Word) {
        if self.verbose() {
            self.sub_line(format!("[0x{addr:04X}] = {value}"));
        }
    }

    fn trace_illegal_write(&mut self, addr: u16, value: Word) {
        let c = self.colors;
        self.lines.push(format!(
            "{SUB_INDENT}{}illegal write of {value} to 0x{addr:04X} in the program segment, halted{}",
            c.red, c.reset
        ));
    }

    fn trace_compare(&mut self, lhs: Word, rhs: Word, flags: Flags) {
        if self.verbose() {
            self.sub_line(format!("compare {lhs} with {rhs}: {flags:?}"));
        }
    }

    fn trace_jump(&mut self, target: u16, taken: bool) {
        if self.verbose() {
            let outcome = if taken { "taken" } else { "not taken" };
            self.sub_line(format!("branch to 0x{target:04X} {outcome}"));
        }
    }

    fn trace_call(&mut self, target: u16, return_address: u16) {
        let c = self.colors;
        self.lines.push(format!(
            "{SUB_INDENT}{}call 0x{target:04X}{} (returns to 0x{return_address:04X})",
            c.blue, c.reset
        ));
    }

    fn trace_return(&mut self, return_address: u16) {
        let c = self.colors;
        self.lines.push(format!(
            "{SUB_INDENT}{}return to 0x{return_address:04X}{}",
            c.blue, c.reset
        ));
    }

    fn trace_halt(&mut self, pc: u16) {
        let c = self.colors;
        self.lines
            .push(format!("{}halted at 0x{pc:04X}{}", c.green, c.reset));
    }
}
