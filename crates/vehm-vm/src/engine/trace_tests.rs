use indoc::indoc;
use vehm_asm::assemble;
use vehm_bytecode::Colors;

use super::{PrintTracer, VM, Verbosity};

const DOUBLE: &str = indoc! {"
    _START:
        MOV $REG1 0x0002
        CALL DOUBLE
        HALT
    DOUBLE:
        ADD $REG1 $REG1
        RET
"};

fn trace(source: &str, verbosity: Verbosity, colors: Colors) -> String {
    let mut vm = VM::load(assemble(source).unwrap()).unwrap();
    let mut tracer = PrintTracer::new(verbosity, colors);
    vm.run_until_halt_with(&mut tracer).unwrap();
    tracer.into_lines().join("\n")
}

#[test]
fn default_verbosity() {
    let output = trace(DOUBLE, Verbosity::Default, Colors::OFF);

    insta::assert_snapshot!(output, @r"
    0x0000  MOV $REG1 0x0002
    0x0004  CALL 0x0008
            call 0x0008 (returns to 0x0007)
    0x0008  ADD $REG1 $REG1
    0x000B  RET
            return to 0x0007
    0x0007  HALT
    halted at 0x0007
    ");
}

#[test]
fn verbose_shows_writes() {
    let output = trace(DOUBLE, Verbosity::Verbose, Colors::OFF);

    insta::assert_snapshot!(output, @r"
    0x0000  MOV $REG1 0x0002
            $REG1 = 0x0002
    0x0004  CALL 0x0008
            $REG6 = 0x0000
            $REG7 = 0x0000
            $REG8 = 0x0007
            $RBP = 0x0000
            call 0x0008 (returns to 0x0007)
    0x0008  ADD $REG1 $REG1
            $REG1 = 0x0004
    0x000B  RET
            $RBP = 0x0000
            $RSP = 0x0000
            return to 0x0007
    0x0007  HALT
    halted at 0x0007
    ");
}

#[test]
fn verbose_shows_stack_compare_and_branch() {
    let source = indoc! {"
        _START:
            PUSH 0x0003
            PUSH 0x0003
            CMP
            JUMP_EQ SAME
            NOOP
        SAME:
            HALT
    "};

    let output = trace(source, Verbosity::Verbose, Colors::OFF);

    insta::assert_snapshot!(output, @r"
    0x0000  PUSH 0x0003
            [0x000C] = 0x0003
            $RSP = 0x0002
    0x0003  PUSH 0x0003
            [0x000E] = 0x0003
            $RSP = 0x0004
    0x0006  CMP
            compare 0x0003 with 0x0003: Flags(EQ)
    0x0007  JUMP_EQ 0x000B
            branch to 0x000B taken
    0x000B  HALT
    halted at 0x000B
    ");
}

#[test]
fn illegal_write_is_reported() {
    let source = indoc! {"
        MOV $REG1 0x0001
        MOV $0x0002 $REG1
        HALT
    "};

    let output = trace(source, Verbosity::Default, Colors::OFF);

    insta::assert_snapshot!(output, @r"
    0x0000  MOV $REG1 0x0001
    0x0004  MOV $0x0002 $REG1
            illegal write of 0x0001 to 0x0002 in the program segment, halted
    ");
}

#[test]
fn colors_wrap_addresses() {
    let plain = trace("HALT", Verbosity::Default, Colors::OFF);
    let colored = trace("HALT", Verbosity::Default, Colors::ON);

    assert!(!plain.contains('\x1b'));
    assert!(colored.contains('\x1b'));
    assert_eq!(plain, "0x0000  HALT\nhalted at 0x0000");
}
