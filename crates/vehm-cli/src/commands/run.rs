//! Execute a program and report the final machine state.

use std::fmt::Write;
use std::path::PathBuf;

use serde::Serialize;
use vehm_bytecode::{Colors, Register};
use vehm_vm::{NoopTracer, PrintTracer, RuntimeError, Tracer, VM, Verbosity, VmConfig};

use super::loader::load_image;

pub struct RunArgs {
    pub input_path: PathBuf,
    pub steps: Option<usize>,
    pub trace: bool,
    pub verbosity: Verbosity,
    pub json: bool,
    pub config: VmConfig,
    pub color: bool,
}

/// Final machine state as printed by `run --json`.
#[derive(Debug, Serialize)]
pub struct MachineState {
    pub halted: bool,
    pub instructions: u64,
    pub registers: Vec<RegisterValue>,
    pub flags: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterValue {
    pub name: &'static str,
    pub value: u16,
}

impl MachineState {
    pub fn capture(vm: &VM, error: Option<&RuntimeError>) -> Self {
        let registers = Register::ALL
            .into_iter()
            .map(|reg| RegisterValue {
                name: reg.name(),
                value: vm.register(reg).as_u16(),
            })
            .collect();

        let flags = vm.flags();
        let flags = [
            ("EQ", flags.equal()),
            ("LT", flags.less_than()),
            ("GT", flags.greater_than()),
            ("INT", flags.interrupt()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();

        Self {
            halted: vm.is_halted(),
            instructions: vm.instruction_count(),
            registers,
            flags,
            error: error.map(ToString::to_string),
        }
    }
}

/// Run until halt, or for at most `steps` instructions.
pub fn execute<T: Tracer>(
    vm: &mut VM,
    steps: Option<usize>,
    tracer: &mut T,
) -> Result<(), RuntimeError> {
    match steps {
        Some(count) => vm.run_with(count, tracer).map(|_| ()),
        None => vm.run_until_halt_with(tracer),
    }
}

/// Human-readable summary: status line, then registers four to a row.
pub fn format_state(vm: &VM, colors: Colors) -> String {
    let mut out = String::new();
    let status = if vm.is_halted() { "halted" } else { "stopped" };
    writeln!(
        out,
        "{}{status}{} after {} instructions at 0x{:04X}",
        colors.green,
        colors.reset,
        vm.instruction_count(),
        vm.pc()
    )
    .unwrap();

    for row in Register::ALL.chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|&reg| {
                format!(
                    "{}{:<5}{} {}",
                    colors.dim,
                    reg.name(),
                    colors.reset,
                    vm.register(reg)
                )
            })
            .collect();
        writeln!(out, "{}", cells.join("  ")).unwrap();
    }

    writeln!(out, "{}flags{} {:?}", colors.dim, colors.reset, vm.flags()).unwrap();
    out
}

pub fn run(args: RunArgs) {
    let image = match load_image(&args.input_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut vm = match VM::builder(&image).config(args.config).build() {
        Ok(vm) => vm,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    let result = if args.trace {
        let mut tracer = PrintTracer::new(args.verbosity, colors);
        let result = execute(&mut vm, args.steps, &mut tracer);
        tracer.print();
        result
    } else {
        execute(&mut vm, args.steps, &mut NoopTracer)
    };

    if args.json {
        let state = MachineState::capture(&vm, result.as_ref().err());
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_state(&vm, colors));
    }

    if let Err(e) = result {
        eprintln!("runtime error: {}", e);
        std::process::exit(2);
    }
}
