use std::fs;
use std::path::PathBuf;

use vehm_asm::assemble;

use super::loader::read_source;

pub struct AsmArgs {
    pub source_path: PathBuf,
    pub output: PathBuf,
}

pub fn run(args: AsmArgs) {
    let source = match read_source(&args.source_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let bytes = match assemble(&source) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = fs::write(&args.output, &bytes) {
        eprintln!("error: failed to write {}: {}", args.output.display(), e);
        std::process::exit(1);
    }
}
