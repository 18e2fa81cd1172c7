//! Integration tests: whole sessions run through the REPL, asserting on
//! what the presenter was told.

use std::sync::Arc;

use relsh_kernel::RecordingPresenter;
use relsh_repl::Repl;
use relsh_types::TypedValue;

/// Run a script through one session and collect the presenter traffic.
fn run_session(script: &str) -> (Vec<String>, Vec<String>) {
    let dir = tempfile::tempdir().unwrap();
    let presenter = Arc::new(RecordingPresenter::new());
    let mut repl = Repl::with_presenter("tester", dir.path(), presenter.clone()).unwrap();

    for line in script.lines() {
        match repl.process_line(line) {
            Ok(_) => {}
            Err(e) if Repl::is_exit(&e) => break,
            Err(e) => panic!("unexpected REPL failure: {e}"),
        }
    }
    (presenter.messages(), presenter.errors())
}

#[test]
fn arithmetic_session() {
    let (messages, errors) = run_session(
        "add 2 3\n\
         multiply result 10\n\
         exit",
    );
    assert_eq!(messages, vec!["5.0", "50.0"]);
    assert!(errors.is_empty());
}

#[test]
fn variables_session() {
    let (messages, errors) = run_session(
        "add 2 3 -> $sum\n\
         vars\n\
         forget $sum\n\
         vars",
    );
    assert_eq!(
        messages,
        vec![
            "$sum = 5.0 (number)",
            "forgot $sum",
            "no variables defined",
        ]
    );
    assert!(errors.is_empty());
}

#[test]
fn failed_line_reports_and_recovers() {
    let (messages, errors) = run_session(
        "divide 10 0\n\
         add 1 2",
    );
    assert_eq!(errors, vec!["division by zero"]);
    assert_eq!(messages, vec!["3.0"]);
}

#[test]
fn calc_session_with_nested_commands() {
    let (messages, errors) = run_session("calc \"(add 2 3) * (add 1 1)\"");
    assert_eq!(messages, vec!["10.0"]);
    assert!(errors.is_empty());
}

#[test]
fn assignment_chain_is_silent() {
    let (messages, _errors) = run_session("7 -> $a -> #b");
    assert!(messages.is_empty());
}

#[test]
fn session_survives_reset() {
    let dir = tempfile::tempdir().unwrap();
    let presenter = Arc::new(RecordingPresenter::new());
    let mut repl = Repl::with_presenter("tester", dir.path(), presenter.clone()).unwrap();

    repl.process_line("9 -> #n").unwrap();
    repl.process_line("1 -> $keep").unwrap();
    repl.process_line("reset").unwrap();

    let state = repl.interpreter().state();
    assert!(state.vars.get("#n").is_none());
    assert_eq!(
        state.vars.get("$keep").unwrap().value,
        TypedValue::Number(1.0)
    );
    assert!(state.last_result().is_null());
}

#[test]
fn failure_flag_tracks_each_line() {
    let dir = tempfile::tempdir().unwrap();
    let presenter = Arc::new(RecordingPresenter::new());
    let mut repl = Repl::with_presenter("tester", dir.path(), presenter).unwrap();

    repl.process_line("sqrt -4").unwrap();
    assert!(repl.last_line_failed());
    repl.process_line("sqrt 4").unwrap();
    assert!(!repl.last_line_failed());
}
