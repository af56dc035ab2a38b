//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vehm")
        .about("Assembler, virtual machine and disassembler for the Vehm 16-bit ISA")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(asm_command())
        .subcommand(run_command())
        .subcommand(dis_command())
}

/// Assemble a source file into a program image.
pub fn asm_command() -> Command {
    Command::new("asm")
        .about("Assemble a source file into a program image")
        .after_help(
            r#"EXAMPLES:
  vehm asm fib.vasm                # writes fib.vbin
  vehm asm fib.vasm -o out.bin     # explicit output path"#,
        )
        .arg(source_path_arg())
        .arg(output_file_arg())
}

/// Execute a program.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Execute a program image or assembly source")
        .after_help(
            r#"EXAMPLES:
  vehm run fib.vbin                # run until HALT
  vehm run fib.vasm --trace        # assemble, run and trace
  vehm run fib.vbin --trace -v     # also trace writes and branches
  vehm run fib.vbin --steps 100 --json"#,
        )
        .arg(input_path_arg())
        .arg(steps_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
        .arg(json_arg())
        .arg(stack_size_arg())
        .arg(memory_size_arg())
        .arg(writable_program_arg())
        .arg(color_arg())
}

/// Disassemble a program image.
pub fn dis_command() -> Command {
    Command::new("dis")
        .about("Disassemble a program image into assembly source")
        .after_help(
            r#"EXAMPLES:
  vehm dis fib.vbin                # re-assemblable source
  vehm dis fib.vbin --addresses    # annotate instruction addresses"#,
        )
        .arg(input_path_arg())
        .arg(implicit_start_arg())
        .arg(addresses_arg())
        .arg(color_arg())
}
