mod cli;
mod commands;

use cli::{AsmParams, DisParams, RunParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("asm", m)) => {
            let params = AsmParams::from_matches(m);
            commands::asm::run(params.into());
        }
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into());
        }
        Some(("dis", m)) => {
            let params = DisParams::from_matches(m);
            commands::dis::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
