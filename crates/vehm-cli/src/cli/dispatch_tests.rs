//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Each subcommand parses its own flags
//! 2. Params extraction and conversion into command args

use std::path::PathBuf;

use vehm_vm::Verbosity;

use super::*;
use crate::cli::commands::{asm_command, dis_command, run_command};
use crate::commands::asm::AsmArgs;
use crate::commands::dis::DisArgs;
use crate::commands::run::RunArgs;

#[test]
fn asm_defaults_output_next_to_source() {
    let m = asm_command()
        .try_get_matches_from(["asm", "dir/fib.vasm"])
        .unwrap();
    let args: AsmArgs = AsmParams::from_matches(&m).into();

    assert_eq!(args.source_path, PathBuf::from("dir/fib.vasm"));
    assert_eq!(args.output, PathBuf::from("dir/fib.vbin"));
}

#[test]
fn asm_explicit_output() {
    let m = asm_command()
        .try_get_matches_from(["asm", "fib.vasm", "-o", "out.bin"])
        .unwrap();
    let args: AsmArgs = AsmParams::from_matches(&m).into();

    assert_eq!(args.output, PathBuf::from("out.bin"));
}

#[test]
fn asm_requires_source() {
    let result = asm_command().try_get_matches_from(["asm"]);
    assert!(result.is_err());
}

#[test]
fn run_defaults() {
    let m = run_command()
        .try_get_matches_from(["run", "fib.vbin"])
        .unwrap();
    let params = RunParams::from_matches(&m);

    assert_eq!(params.input_path, PathBuf::from("fib.vbin"));
    assert_eq!(params.steps, None);
    assert!(!params.trace);
    assert!(!params.json);
    assert_eq!(params.stack_size, 4096);
    assert_eq!(params.memory_size, 0x10000);
    assert!(!params.writable_program);
    assert_eq!(params.color, ColorChoice::Auto);

    let args: RunArgs = params.into();
    assert!(args.config.is_program_readonly());
    assert_eq!(args.verbosity, Verbosity::Default);
}

#[test]
fn run_all_flags() {
    let m = run_command()
        .try_get_matches_from([
            "run",
            "fib.vasm",
            "--steps",
            "100",
            "--trace",
            "--json",
            "--stack-size",
            "256",
            "--memory-size",
            "1024",
            "--writable-program",
            "--color",
            "never",
        ])
        .unwrap();
    let args: RunArgs = RunParams::from_matches(&m).into();

    assert_eq!(args.steps, Some(100));
    assert!(args.trace);
    assert!(args.json);
    assert!(!args.color);
    assert_eq!(args.config.get_stack_size(), 256);
    assert_eq!(args.config.get_memory_size(), 1024);
    assert!(!args.config.is_program_readonly());
}

#[test]
fn verbose_implies_trace() {
    let m = run_command()
        .try_get_matches_from(["run", "fib.vbin", "-v"])
        .unwrap();
    let args: RunArgs = RunParams::from_matches(&m).into();

    assert!(args.trace);
    assert_eq!(args.verbosity, Verbosity::Verbose);
}

#[test]
fn run_rejects_bad_numbers() {
    let result = run_command().try_get_matches_from(["run", "fib.vbin", "--steps", "many"]);
    assert!(result.is_err());
}

#[test]
fn dis_flags() {
    let m = dis_command()
        .try_get_matches_from([
            "dis",
            "fib.vbin",
            "--implicit-start",
            "--addresses",
            "--color",
            "always",
        ])
        .unwrap();
    let args: DisArgs = DisParams::from_matches(&m).into();

    assert_eq!(args.input_path, PathBuf::from("fib.vbin"));
    assert!(args.implicit_start);
    assert!(args.addresses);
    assert!(args.color);
}

#[test]
fn cli_lists_subcommands() {
    let cli = build_cli();
    let names: Vec<_> = cli.get_subcommands().map(|c| c.get_name()).collect();

    assert_eq!(names, ["asm", "run", "dis"]);
}
