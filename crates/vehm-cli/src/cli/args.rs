//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Assembly source file (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Assembly source file")
}

/// Program image or `.vasm` source (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("INPUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Program image, or assembly source if it ends in .vasm")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file (default: input with .vbin extension)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Print an execution trace (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print each executed instruction")
}

/// Trace verbosity (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Also trace register and memory writes, comparisons and branches")
}

/// Instruction limit (--steps).
pub fn steps_arg() -> Arg {
    Arg::new("steps")
        .long("steps")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Stop after N instructions even if the program has not halted")
}

/// Print the final machine state as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the final machine state as JSON")
}

/// Stack segment size (--stack-size).
pub fn stack_size_arg() -> Arg {
    Arg::new("stack_size")
        .long("stack-size")
        .value_name("BYTES")
        .default_value("4096")
        .value_parser(value_parser!(usize))
        .help("Stack segment size in bytes")
}

/// Total memory size (--memory-size).
pub fn memory_size_arg() -> Arg {
    Arg::new("memory_size")
        .long("memory-size")
        .value_name("BYTES")
        .default_value("65536")
        .value_parser(value_parser!(usize))
        .help("Total memory in bytes (at most 65536)")
}

/// Allow writes into the program segment (--writable-program).
pub fn writable_program_arg() -> Arg {
    Arg::new("writable_program")
        .long("writable-program")
        .action(ArgAction::SetTrue)
        .help("Allow writes into the program segment instead of halting")
}

/// Do not print a `_START:` line (--implicit-start).
pub fn implicit_start_arg() -> Arg {
    Arg::new("implicit_start")
        .long("implicit-start")
        .action(ArgAction::SetTrue)
        .help("Omit the _START: label and instruction indentation")
}

/// Annotate lines with addresses (--addresses).
pub fn addresses_arg() -> Arg {
    Arg::new("addresses")
        .long("addresses")
        .action(ArgAction::SetTrue)
        .help("Annotate each instruction with its address")
}
