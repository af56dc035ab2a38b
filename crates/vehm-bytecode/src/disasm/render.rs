//! Listing to text.

use std::fmt::Write as _;

use crate::Colors;
use crate::isa::{Instruction, Operands};

use super::DisasmOptions;
use super::listing::{Listing, StaticListing};

const INDENT: &str = "    ";

pub(super) fn render(listing: &Listing<'_>, options: &DisasmOptions) -> String {
    let c = options.colors;
    let mut out = String::new();

    render_static(&mut out, listing, c);

    let mut indent = !options.implicit_start;
    if !options.implicit_start {
        writeln!(out, "{}_START{}:", c.blue, c.reset).unwrap();
    }

    for (addr, instr) in &listing.instructions {
        if let Some(label) = listing.label(*addr) {
            writeln!(out, "{}{label}{}:", c.blue, c.reset).unwrap();
            indent = true;
        }

        let pad = if indent { INDENT } else { "" };
        let text = format_instruction(instr, listing, c);
        if options.addresses {
            writeln!(out, "{pad}{text}  {}// 0x{addr:04X}{}", c.dim, c.reset).unwrap();
        } else {
            writeln!(out, "{pad}{text}").unwrap();
        }
    }

    // A jump to the end of the code still needs its (empty) section.
    if let Some(label) = listing.label(listing.end) {
        writeln!(out, "{}{label}{}:", c.blue, c.reset).unwrap();
    }

    out
}

fn render_static(out: &mut String, listing: &Listing<'_>, c: Colors) {
    match &listing.statics {
        StaticListing::Empty => {}
        StaticListing::Items(items) => {
            out.push_str(".STATIC\n");
            for (offset, text) in items {
                writeln!(out, "$S{offset:04X}: {}\"{text}\"{}", c.green, c.reset).unwrap();
            }
        }
        StaticListing::Opaque(len) => {
            writeln!(
                out,
                "{}// static segment: {len} bytes with no string-literal form{}",
                c.dim, c.reset
            )
            .unwrap();
        }
    }
}

fn format_instruction(instr: &Instruction, listing: &Listing<'_>, c: Colors) -> String {
    let imm = |value: u16| format!("{}0x{value:04X}{}", c.green, c.reset);
    let mem = |addr: u16| format!("{}$0x{addr:04X}{}", c.green, c.reset);

    let operands = match instr.operands() {
        Operands::None => vec![],
        Operands::Imm(value) => match instr.target().and_then(|t| listing.label(t)) {
            Some(label) => vec![format!("{}{label}{}", c.blue, c.reset)],
            None => vec![imm(value)],
        },
        Operands::Reg(reg) => vec![reg.to_string()],
        Operands::RegImm(reg, value) => vec![reg.to_string(), imm(value)],
        Operands::RegReg(dst, src) => vec![dst.to_string(), src.to_string()],
        Operands::RegMem(reg, addr) => vec![reg.to_string(), mem(addr)],
        Operands::MemReg(addr, reg) => vec![mem(addr), reg.to_string()],
    };

    let mut line = instr.opcode().mnemonic().to_string();
    for operand in operands {
        line.push(' ');
        line.push_str(&operand);
    }
    line
}
