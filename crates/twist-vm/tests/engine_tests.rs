//! Integration tests for the Twist engine.
//!
//! Programs are written as source text, loaded through the lexer and
//! parser, and run against a `BufferedHost`.
//! - arithmetic and wheel scenarios
//! - calls, arguments and returns
//! - ERRH recovery and kind filters
//! - fatal diagnostics

use twist_lexer::Lexer;
use twist_parser::Parser;
use twist_types::{ErrorKind, Opcode, Program, SourceFile, Value};
use twist_vm::{BufferedHost, Diagnostic, Exit, Machine, RunError};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Parse Twist source into a Program (panics on load errors).
fn parse(source: &str) -> Program {
    let sf = SourceFile::new("test.whl", source);
    let lex = Lexer::new(&sf).lex();
    assert!(!lex.errors.has_errors(), "lex errors:\n{}", lex.errors);
    let result = Parser::new(lex.tokens, &sf).parse();
    if result.errors.has_errors() {
        panic!("parse errors:\n{}", result.errors);
    }
    result.program.expect("no program after successful parse")
}

/// Everything a finished run leaves behind.
struct Finished {
    result: Result<Exit, RunError>,
    output: Vec<String>,
    wheel: Vec<Value>,
    cursor_value: Option<Value>,
}

fn run_with_input(source: &str, input: &[&str]) -> Finished {
    let program = parse(source);
    let mut machine = Machine::new(&program, BufferedHost::with_input(input.iter().copied()));
    let result = machine.run().map(|outcome| outcome.exit);
    let wheel = machine.active_wheel().values().to_vec();
    let cursor_value = machine.active_wheel().current().ok().cloned();
    Finished {
        result,
        output: machine.into_host().output,
        wheel,
        cursor_value,
    }
}

fn run(source: &str) -> Finished {
    run_with_input(source, &[])
}

/// Run and return the fatal diagnostic (panics if the run succeeded).
fn fatal(source: &str) -> Diagnostic {
    match run(source).result {
        Err(RunError::Fatal(diag)) => diag,
        other => panic!("expected a fatal fault, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Scenarios
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_sum_the_wheel() {
    let done = run("NEWV 5\nNEWV 3\nADD\n");
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
    assert_eq!(done.cursor_value, Some(Value::Integer(8)));
}

#[test]
fn scenario_subtract_queued_values_in_order() {
    let source = "\
NEWV 10
NEWV 3
NEWV 2
ADDARG
MOVVW 1
ADDARG
MOVVW 1
ADDARG
SUB 3 %
";
    let done = run(source);
    done.result.unwrap();
    assert_eq!(done.cursor_value, Some(Value::Integer(5)));
}

#[test]
fn scenario_greet_through_a_call() {
    let source = "\
DEF greet 1
OUT
RET
NEWV \"Tom\"
ADDARG
CALL greet %
";
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
    assert_eq!(done.output, vec!["Tom"]);
    // The callee's wheel is gone; the global wheel keeps its value.
    assert_eq!(done.wheel, vec![Value::from("Tom")]);
}

#[test]
fn scenario_recover_from_empty_wheel() {
    let source = "\
MOVVW 1
ERRH EMPTY_VWHEEL 2
OUT \"recovered\"
";
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
    assert_eq!(done.output, vec!["recovered"]);
}

#[test]
fn scenario_unhandled_division_by_zero() {
    let source = "\
NEWV 5
NEWV 0
ADDARG
MOVVW 1
ADDARG
DIV 2 %
";
    let diag = fatal(source);
    assert_eq!(diag.kind, ErrorKind::DivisionByZero);
    assert_eq!(diag.opcode, Opcode::Div);
    assert_eq!(diag.argument, 2);
    assert_eq!(diag.cursor, 5);
    assert_eq!(diag.line, 6);
    assert_eq!(
        diag.to_string(),
        "Division by zero @ cursor 5, instruction DIV, argument 2 (line 6)"
    );
}

#[test]
fn scenario_compare_integer_against_text() {
    let source = "\
NEWV 42
CMP \"42\"
JIZ 2
OUT \"equal\"
";
    let done = run(source);
    assert_eq!(done.output, vec!["equal"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// Wheels
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn movvw_wraps_both_ways() {
    let done = run("NEWV 1\nNEWV 2\nNEWV 3\nMOVVW -1\nOUT\nMOVVW 4\nOUT\n");
    assert_eq!(done.output, vec!["3", "1"]);
}

#[test]
fn whldirv_reverses_rotation() {
    let done = run("NEWV 1\nNEWV 2\nNEWV 3\nWHLDIRV -1\nMOVVW 1\nOUT\n");
    assert_eq!(done.output, vec!["3"]);
}

#[test]
fn whole_wheel_division_yields_a_float() {
    let done = run("NEWV 7\nNEWV 2\nDIV\nOUT\n");
    assert_eq!(done.output, vec!["3.5"]);
    assert_eq!(done.cursor_value, Some(Value::Float(3.5)));
}

#[test]
fn float_result_is_not_numeric_afterwards() {
    let diag = fatal("NEWV 7\nNEWV 2\nDIV\nADD 1\n");
    assert_eq!(diag.kind, ErrorKind::NumericDataRequired);
}

#[test]
fn multiply_literal_shorthand() {
    let done = run("NEWV 6\nMUL 7\nOUT\n");
    assert_eq!(done.output, vec!["42"]);
}

#[test]
fn division_by_zero_leaves_the_wheel_unchanged() {
    let source = "\
NEWV 8
NEWV 0
DIV
ERRH DIVISION_BY_ZERO 1
";
    let done = run(source);
    done.result.unwrap();
    assert_eq!(done.wheel, vec![Value::Integer(8), Value::Integer(0)]);
}

#[test]
fn input_prompt_and_echo() {
    let done = run_with_input("NEWV\nINP \"name?\"\nOUT\n", &["Ada"]);
    assert_eq!(done.output, vec!["name?", "Ada"]);
}

#[test]
fn a_simple_counting_loop() {
    // Count 1..=3: print, increment, compare against 3, loop while not above.
    let source = "\
NEWV 1
OUT
ADD 1
CMP 3
JIZ -3
OUT \"done\"
";
    let done = run(source);
    assert_eq!(done.output, vec!["1", "2", "3", "done"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// Calls
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn arguments_arrive_in_queue_order() {
    let source = "\
DEF pair 2
OUT
MOVVW 1
OUT
RET
NEWV \"a\"
NEWV \"b\"
ADDARG
MOVVW 1
ADDARG
CALL pair %
";
    let done = run(source);
    assert_eq!(done.output, vec!["a", "b"]);
}

#[test]
fn nested_calls_return_in_lifo_order() {
    let source = "\
DEF inner
OUT \"inner\"
RET
DEF outer
OUT \"outer in\"
CALL inner
OUT \"outer out\"
RET
CALL outer
OUT \"main\"
";
    let done = run(source);
    assert_eq!(done.output, vec!["outer in", "inner", "outer out", "main"]);
}

#[test]
fn queue_is_shared_across_calls() {
    let source = "\
DEF stage
NEWV 9
ADDARG
RET
CALL stage
NEWV
ADD 1 %
OUT
";
    let done = run(source);
    assert_eq!(done.output, vec!["9"]);
}

#[test]
fn jumping_over_def_runs_the_body_inline() {
    let source = "\
JMP 2
DEF tail
OUT \"in tail\"
";
    // JMP skips the DEF; the body simply runs to the end of the stream.
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
    assert_eq!(done.output, vec!["in tail"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// ERRH
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn errh_without_kind_catches_everything() {
    let source = "\
CALL missing
ERRH 3
OUT \"skipped\"
OUT \"caught\"
";
    assert_eq!(run(source).output, vec!["caught"]);
}

#[test]
fn errh_kind_mismatch_resumes_after_the_handler() {
    let source = "\
MOVVW 1
ERRH DIVISION_BY_ZERO 3
OUT \"after handler\"
OUT \"jump target\"
";
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
    assert_eq!(done.output, vec!["after handler", "jump target"]);
}

#[test]
fn errh_mismatch_at_end_of_stream_finishes() {
    let done = run("MOVVW 1\nERRH NOT_ENOUGH_ARGS 5\n");
    assert_eq!(done.result.unwrap(), Exit::EndOfStream);
}

#[test]
fn errh_accepts_legacy_names() {
    let source = "\
ADD 1 %
ERRH NOT_ENOUGH_ARGS_ERROR 3
OUT \"no\"
OUT \"legacy ok\"
";
    assert_eq!(run(source).output, vec!["legacy ok"]);
}

#[test]
fn errh_jump_wraps_around_the_stream() {
    let source = "\
JMP 3
OUT \"wrapped\"
RET
MOVVW 1
ERRH 3
";
    // Failing cursor 3, displacement 3 on a five-instruction stream → 1.
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::Returned);
    assert_eq!(done.output, vec!["wrapped"]);
}

#[test]
fn errh_follows_the_control_direction() {
    let source = "\
WHLDIRC -1
JMP -3
OUT \"landed\"
RET
MOVVW 1
ERRH 2
";
    // Backward: JMP -3 from 1 goes to 4, MOVVW fails, ERRH 2 from 4 → 2.
    // OUT then advances to 3 (cursor + 1), a top-level RET.
    let done = run(source);
    assert_eq!(done.result.unwrap(), Exit::Returned);
    assert_eq!(done.output, vec!["landed"]);
}

#[test]
fn errh_must_be_immediately_after() {
    let diag = fatal("MOVVW 1\nOUT \"x\"\nERRH 1\n");
    assert_eq!(diag.kind, ErrorKind::EmptyWheel);
    assert_eq!(diag.cursor, 0);
}

#[test]
fn fault_inside_a_call_is_fatal_without_local_handler() {
    let source = "\
DEF f
OUT
RET
CALL f
ERRH 1
";
    let diag = fatal(source);
    assert_eq!(diag.kind, ErrorKind::EmptyWheel);
    assert_eq!(diag.opcode, Opcode::Out);
    assert_eq!(diag.cursor, 1);
}

#[test]
fn fatal_fault_stops_output() {
    let done = run("OUT \"before\"\nMOVVW 1\nOUT \"after\"\n");
    assert!(matches!(done.result, Err(RunError::Fatal(_))));
    assert_eq!(done.output, vec!["before"]);
}
