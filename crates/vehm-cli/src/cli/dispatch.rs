//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use vehm_vm::{Verbosity, VmConfig};

use super::ColorChoice;
use crate::commands::asm::AsmArgs;
use crate::commands::dis::DisArgs;
use crate::commands::run::RunArgs;

pub struct AsmParams {
    pub source_path: PathBuf,
    pub output: Option<PathBuf>,
}

impl AsmParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<AsmParams> for AsmArgs {
    fn from(p: AsmParams) -> Self {
        let output = p
            .output
            .unwrap_or_else(|| p.source_path.with_extension("vbin"));
        Self {
            source_path: p.source_path,
            output,
        }
    }
}

pub struct RunParams {
    pub input_path: PathBuf,
    pub steps: Option<usize>,
    pub trace: bool,
    pub verbose: u8,
    pub json: bool,
    pub stack_size: usize,
    pub memory_size: usize,
    pub writable_program: bool,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: required_path(m, "input_path"),
            steps: m.get_one::<usize>("steps").copied(),
            trace: m.get_flag("trace"),
            verbose: m.get_count("verbose"),
            json: m.get_flag("json"),
            stack_size: *m.get_one::<usize>("stack_size").unwrap(),
            memory_size: *m.get_one::<usize>("memory_size").unwrap(),
            writable_program: m.get_flag("writable_program"),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            _ => Verbosity::Verbose,
        };
        let config = VmConfig::new()
            .stack_size(p.stack_size)
            .memory_size(p.memory_size)
            .program_readonly(!p.writable_program);

        Self {
            input_path: p.input_path,
            steps: p.steps,
            // -v implies --trace
            trace: p.trace || p.verbose > 0,
            verbosity,
            json: p.json,
            config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DisParams {
    pub input_path: PathBuf,
    pub implicit_start: bool,
    pub addresses: bool,
    pub color: ColorChoice,
}

impl DisParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: required_path(m, "input_path"),
            implicit_start: m.get_flag("implicit_start"),
            addresses: m.get_flag("addresses"),
            color: parse_color(m),
        }
    }
}

impl From<DisParams> for DisArgs {
    fn from(p: DisParams) -> Self {
        Self {
            input_path: p.input_path,
            implicit_start: p.implicit_start,
            addresses: p.addresses,
            color: p.color.should_colorize(),
        }
    }
}

/// Required positionals are enforced by clap before dispatch.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id)
        .cloned()
        .expect("clap enforces required positionals")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
