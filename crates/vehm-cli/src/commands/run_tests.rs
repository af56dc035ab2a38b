use indoc::indoc;
use serde_json::json;
use vehm_asm::assemble;
use vehm_bytecode::Colors;
use vehm_vm::{NoopTracer, VM};

use super::run::{MachineState, execute, format_state};

const CALL: &str = indoc! {"
    _START:
        PUSH 0x0001
        CALL FUNC
        HALT
    FUNC:
        MOV $REG1 0x0042
        RET
"};

fn load(source: &str) -> VM {
    VM::load(assemble(source).unwrap()).unwrap()
}

#[test]
fn summary_after_halt() {
    let mut vm = load(CALL);
    execute(&mut vm, None, &mut NoopTracer).unwrap();

    insta::assert_snapshot!(format_state(&vm, Colors::OFF), @r"
    halted after 5 instructions at 0x0006
    $REG1 0x0042  $REG2 0x0000  $REG3 0x0000  $REG4 0x0000
    $REG5 0x0000  $REG6 0x0000  $REG7 0x0002  $REG8 0x0006
    $RPC  0x0006  $RSP  0x0002  $RBP  0x0000  $RFL  0x0000
    flags Flags()
    ");
}

#[test]
fn step_limit_stops_early() {
    let mut vm = load(CALL);
    execute(&mut vm, Some(2), &mut NoopTracer).unwrap();

    assert!(!vm.is_halted());
    let summary = format_state(&vm, Colors::OFF);
    assert!(summary.starts_with("stopped after 2 instructions at 0x0007\n"));
}

#[test]
fn json_state() {
    let mut vm = load(indoc! {"
        MOV $REG1 0x0001
        CMP $REG1 $REG2
        HALT
    "});
    execute(&mut vm, None, &mut NoopTracer).unwrap();

    let value = serde_json::to_value(MachineState::capture(&vm, None)).unwrap();

    assert_eq!(value["halted"], json!(true));
    assert_eq!(value["instructions"], json!(3));
    assert_eq!(value["registers"][0], json!({ "name": "$REG1", "value": 1 }));
    assert_eq!(value["registers"][8], json!({ "name": "$RPC", "value": 7 }));
    assert_eq!(value["flags"], json!(["GT"]));
    assert!(value.get("error").is_none());
}

#[test]
fn json_state_includes_runtime_error() {
    let mut vm = load(indoc! {"
        MOV $REG1 0x0001
        DIV $REG1 $REG2
        HALT
    "});
    let err = execute(&mut vm, None, &mut NoopTracer).unwrap_err();

    let value = serde_json::to_value(MachineState::capture(&vm, Some(&err))).unwrap();

    assert_eq!(value["halted"], json!(false));
    assert_eq!(value["error"], json!("integer division by zero at 0x0004"));
}
