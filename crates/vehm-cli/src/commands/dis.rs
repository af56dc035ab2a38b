use std::path::PathBuf;

use vehm_bytecode::{Colors, DisasmOptions, disassemble};

use super::loader::load_image;

pub struct DisArgs {
    pub input_path: PathBuf,
    pub implicit_start: bool,
    pub addresses: bool,
    pub color: bool,
}

pub fn run(args: DisArgs) {
    let image = match load_image(&args.input_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let options = DisasmOptions::new()
        .implicit_start(args.implicit_start)
        .addresses(args.addresses)
        .colors(Colors::new(args.color));

    match disassemble(&image, &options) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
