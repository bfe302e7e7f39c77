//! End-to-end tests running complete ><> programs through a session.

use fish::{DebugEvent, DebugState, RunOutcome, Session, SessionConfig, render_output};
use fish_vm::RuntimeError;
use proptest::prelude::*;

const HELLO: &str = include_str!("programs/hello.fish");
const QUINE: &str = include_str!("programs/quine.fish");
const SQRT: &str = include_str!("programs/sqrt.fish");
const MIRRORS: &str = include_str!("programs/mirrors.fish");
const OVERFLOW: &str = include_str!("programs/overflow.fish");
const ECHO: &str = include_str!("programs/echo.fish");

fn config() -> SessionConfig {
    SessionConfig {
        max_steps: Some(10_000),
        seed: Some(1),
    }
}

/// Run to completion and return the rendered output.
fn run_ok(source: &str, stack: &[f64]) -> String {
    let mut session = Session::new(source, stack, config());
    match session.run(None).expect("session should run") {
        RunOutcome::Completed { output, .. } => render_output(&output),
        other => panic!("expected completion, got {other:?}"),
    }
}

/// Run and return the error that ended the program.
fn run_err(source: &str) -> (RuntimeError, String) {
    let mut session = Session::new(source, &[], config());
    match session.run(None).expect("session should run") {
        RunOutcome::Failed { error, output, .. } => (error, render_output(&output)),
        other => panic!("expected failure, got {other:?}"),
    }
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn hello_world() {
    assert_eq!(run_ok(HELLO, &[]), "hello, world");
}

#[test]
fn quine_prints_itself() {
    assert_eq!(run_ok(QUINE, &[]), QUINE);
}

#[test]
fn integer_square_root() {
    assert_eq!(run_ok(SQRT, &[9.0]), "3");
    assert_eq!(run_ok(SQRT, &[25.0]), "5");
}

#[test]
fn mirrors_and_string_mode() {
    assert_eq!(run_ok(MIRRORS, &[]), "/110\n/110\n/110\n/110\n");
}

#[test]
fn put_and_get_outside_program() {
    assert_eq!(run_ok(OVERFLOW, &[]), "65536");
}

#[test]
fn echo_input() {
    let mut session = Session::new(ECHO, &[], config()).with_input("><> fish");
    let outcome = session.run(None).unwrap();
    assert!(matches!(outcome, RunOutcome::Completed { .. }));
    assert_eq!(render_output(outcome.output()), "><> fish");
}

#[test]
fn echo_without_input_prints_nothing() {
    assert_eq!(run_ok(ECHO, &[]), "");
}

#[test]
fn zero_divided_by_five() {
    assert_eq!(run_ok("05,n;", &[]), "0");
}

#[test]
fn carriage_returns_are_ignored() {
    assert_eq!(run_ok("v\r\n>1n;", &[]), "1");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn division_by_zero_produces_no_output() {
    let (error, output) = run_err("50,n;");
    assert_eq!(error, RuntimeError::DivisionByZero);
    assert_eq!(output, "");
}

#[test]
fn unknown_instruction() {
    let (error, output) = run_err("1nZ;");
    assert_eq!(error, RuntimeError::InvalidInstruction('Z'));
    assert_eq!(output, "1");
}

#[test]
fn empty_substack_count_underflows() {
    let (error, _) = run_err("[");
    assert!(matches!(error, RuntimeError::StackUnderflow { .. }));
}

// ============================================================================
// Limits and randomness
// ============================================================================

#[test]
fn step_limit() {
    let mut session = Session::new(
        ">",
        &[],
        SessionConfig {
            max_steps: Some(50),
            seed: None,
        },
    );
    let outcome = session.run(None).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::StepLimit {
            output: Vec::new(),
            steps: 50,
        }
    );
    assert!(!session.program().has_terminated());
}

#[test]
fn seeded_runs_repeat() {
    let run = |seed| {
        let mut session = Session::new(
            "x1n;",
            &[],
            SessionConfig {
                max_steps: Some(10_000),
                seed: Some(seed),
            },
        );
        let outcome = session.run(None).unwrap();
        (render_output(outcome.output()), session.program().steps())
    };

    for seed in 0..8 {
        assert_eq!(run(seed), run(seed));
    }
}

// ============================================================================
// Debugging
// ============================================================================

#[test]
fn breakpoint_on_second_line() {
    let mut session = Session::new(HELLO, &[], config());
    let mut debug = DebugState::new();
    // The `l` that checks for remaining characters.
    debug.add_breakpoint((14, 1));

    let mut hits = 0;
    loop {
        match session.run(Some(&mut debug)).unwrap() {
            RunOutcome::Debug {
                event: DebugEvent::Breakpoint(position),
                ..
            } => {
                assert_eq!(position, (14, 1));
                hits += 1;
                debug.continue_running();
            }
            RunOutcome::Completed { output, .. } => {
                assert_eq!(render_output(&output), "hello, world");
                break;
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    // Once per character, plus the final empty check.
    assert_eq!(hits, 13);
}

#[test]
fn single_stepping_walks_the_grid() {
    let mut session = Session::new("12+n;", &[], config());
    let mut debug = DebugState::paused();

    let mut positions = Vec::new();
    while !session.program().has_terminated() {
        if let RunOutcome::Debug { .. } = session.run(Some(&mut debug)).unwrap() {
            positions.push(session.program().next_position());
            debug.step_into();
        }
    }
    assert_eq!(
        positions,
        vec![
            Some((0, 0)),
            Some((1, 0)),
            Some((2, 0)),
            Some((3, 0)),
            Some((4, 0)),
        ]
    );
}

proptest! {
    #[test]
    fn sessions_always_stop(source in "[0-9a-f+*:~$@rl&{}nxo;><^v/\\\\|_# ]{1,24}") {
        let mut session = Session::new(&source, &[], SessionConfig {
            max_steps: Some(500),
            seed: Some(3),
        });
        let outcome = session.run(None).unwrap();
        match outcome {
            RunOutcome::Completed { steps, .. }
            | RunOutcome::Failed { steps, .. }
            | RunOutcome::StepLimit { steps, .. } => prop_assert!(steps <= 500),
            RunOutcome::Debug { .. } => prop_assert!(false, "paused without a debugger"),
        }
    }
}
