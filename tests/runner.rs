//! Integration tests for the process test runner, driven through a
//! shell-scripted backend so no real compiler toolchain is needed.
#![cfg(unix)]

mod common;
use common::{Event, RecordingLogger};
use saiten::error::RunError;
use saiten::prelude::*;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Runs the harness source through `sh`. An optional compile command stands
/// in for a real compiler.
struct ScriptBackend {
    compile: Option<Vec<String>>,
}

impl ScriptBackend {
    fn new() -> Self {
        Self { compile: None }
    }
}

impl LanguageBackend for ScriptBackend {
    fn name(&self) -> &'static str {
        "Script"
    }

    fn source_file_name(&self) -> &str {
        "solution.sh"
    }

    fn compile_command(&self, _src: &Path) -> Option<Vec<String>> {
        self.compile.clone()
    }

    fn run_command(&self, src: &Path) -> Vec<String> {
        vec!["sh".to_string(), src.display().to_string()]
    }

    fn diagnostic(&self, raw: &str, _src_path: &Path, _user_line_offset: usize) -> Option<String> {
        if raw.contains("error") {
            Some(raw.to_string())
        } else {
            None
        }
    }
}

/// A harness stand-in that answers every test case with its own expected
/// value, so every comparison passes.
const ECHO_SCRIPT: &str = r#"while read line; do
  exp="${line##*;}"
  echo "{\"expected\": $exp, \"result\": $exp, \"duration\": 1.5}"
done
"#;

fn cases(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_all_tests_pass() {
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner
        .run(ECHO_SCRIPT, &cases(&["1;2;3", "4;5;10"]), &logger)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Passed);
    let events = logger.events();
    assert!(events.contains(&Event::Passed(1)));
    assert!(events.contains(&Event::Passed(2)));
    assert!(events.contains(&Event::Info("All tests PASSED".to_string())));
}

#[test]
fn test_runner_is_reusable_after_a_run() {
    let runner = TestRunner::new(ScriptBackend::new());
    for _ in 0..2 {
        let logger = RecordingLogger::new();
        let outcome = runner.run(ECHO_SCRIPT, &cases(&["1;2;3"]), &logger).unwrap();
        assert_eq!(outcome, RunOutcome::Passed);
    }
}

#[test]
fn test_assertion_mismatch_halts_the_run() {
    // Answers 0 regardless of the test case.
    let script = r#"while read line; do
  echo "{\"result\": 0, \"duration\": 1.0}"
done
"#;
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner
        .run(script, &cases(&["1;2;3", "4;5;10"]), &logger)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Assertion));
    let events = logger.events();
    assert!(events.contains(&Event::Failed {
        index: 1,
        expected: json!(3),
        actual: json!(0),
    }));
    // Fail-fast: the second case was never adjudicated.
    assert!(!events.iter().any(|e| matches!(e, Event::Passed(_))));
    assert!(!events.iter().any(|e| matches!(e, Event::Failed { index: 2, .. })));
}

#[test]
fn test_compile_failure_halts_before_running() {
    let backend = ScriptBackend {
        compile: Some(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo 'solution.sh:3: syntax error' >&2".to_string(),
        ]),
    };
    let runner = TestRunner::new(backend);
    let logger = RecordingLogger::new();
    let outcome = runner.run(ECHO_SCRIPT, &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Compile));
    let events = logger.events();
    assert!(events.iter().any(|e| matches!(e, Event::Error(m) if m.contains("syntax error"))));
    assert!(!events.contains(&Event::Info("Running tests...".to_string())));
}

#[test]
fn test_early_exit_is_a_runtime_fault() {
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner.run("exit 7\n", &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Runtime));
}

#[test]
fn test_stderr_diagnostic_is_a_runtime_fault() {
    let script = "echo 'runtime error: boom' >&2\nsleep 5\n";
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner.run(script, &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Runtime));
    let events = logger.events();
    assert!(events.iter().any(|e| matches!(e, Event::Error(m) if m.contains("boom"))));
}

#[test]
fn test_plain_output_is_forwarded_as_info() {
    let script = r#"while read line; do
  echo "working on it"
  exp="${line##*;}"
  echo "{\"expected\": $exp, \"result\": $exp, \"duration\": 0.5}"
done
"#;
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner.run(script, &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Passed);
    assert!(logger.events().contains(&Event::Info("working on it".to_string())));
}

#[test]
fn test_malformed_test_case() {
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let err = runner
        .run(ECHO_SCRIPT, &cases(&["1;2;not json"]), &logger)
        .unwrap_err();

    assert!(matches!(err, RunError::MalformedTestCase { index: 1, .. }));
}

#[test]
fn test_cancellation_from_another_thread() {
    let runner = TestRunner::new(ScriptBackend::new());
    let handle = runner.cancel_handle();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        handle.cancel();
    });

    let logger = RecordingLogger::new();
    let outcome = runner.run("sleep 30\n", &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(logger.events().contains(&Event::Cancelled));
    canceller.join().unwrap();
}

#[test]
fn test_cancellation_during_compile() {
    let backend = ScriptBackend {
        compile: Some(vec![
            "sh".to_string(),
            "-c".to_string(),
            "sleep 30".to_string(),
        ]),
    };
    let runner = TestRunner::new(backend);
    let handle = runner.cancel_handle();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        handle.cancel();
    });

    let logger = RecordingLogger::new();
    let started = Instant::now();
    let outcome = runner.run(ECHO_SCRIPT, &cases(&["1;2;3"]), &logger).unwrap();

    // The compiler process must be killed, not waited out.
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(logger.events().contains(&Event::Cancelled));
    canceller.join().unwrap();
}

#[test]
fn test_late_stderr_error_survives_chatty_output() {
    // Floods stderr with benign chatter well past the retained window,
    // then reports a genuine error.
    let script = r#"i=0
while [ $i -lt 4000 ]; do
  echo "benign chatter line $i" >&2
  i=$((i+1))
done
echo 'runtime error: late boom' >&2
sleep 5
"#;
    let runner = TestRunner::new(ScriptBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner.run(script, &cases(&["1;2;3"]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Runtime));
    let events = logger.events();
    let message = events
        .iter()
        .find_map(|e| match e {
            Event::Error(m) => Some(m.clone()),
            _ => None,
        })
        .unwrap();
    assert!(message.contains("late boom"));
    // The oldest chatter was evicted from the retained window.
    assert!(!message.contains("benign chatter line 0\n"));
}

// The tests below run a real generated Python harness through the
// interpreter, covering the whole pipeline from grammar to adjudication.

#[test]
fn test_python_harness_end_to_end() {
    let suite = TestSuite::new("sum", "calculate sum of 2 numbers", &["int[a]", "int[b]", "int"]).unwrap();
    let template = solution_template(&suite, Language::Python).unwrap();
    let solution = template.replace("pass", "return a + b");
    let harness = test_harness(&suite, Language::Python, &solution).unwrap();

    let runner = TestRunner::new(PythonBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner
        .run(&harness.source, &cases(&["1;2;3", "4;5;10"]), &logger)
        .unwrap();

    // The second case expects 10 but a correct sum yields 9.
    assert_eq!(outcome, RunOutcome::Failed(FailureKind::Assertion));
    let events = logger.events();
    assert!(events.contains(&Event::Passed(1)));
    assert!(events.contains(&Event::Failed {
        index: 2,
        expected: json!(10),
        actual: json!(9),
    }));
}

#[test]
fn test_python_harness_nested_matrix() {
    let suite = TestSuite::new("flatten_sum", "sum all matrix cells", &["array(array(int))[a]", "int"]).unwrap();
    let template = solution_template(&suite, Language::Python).unwrap();
    let solution = template.replace("pass", "return sum(map(sum, a))");
    let harness = test_harness(&suite, Language::Python, &solution).unwrap();

    let runner = TestRunner::new(PythonBackend::new());
    let logger = RecordingLogger::new();
    let outcome = runner
        .run(&harness.source, &cases(&["[[1,2],[3,4]];10"]), &logger)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Passed);
    assert!(logger.events().contains(&Event::Passed(1)));
}

#[test]
fn test_python_harness_round_trips_structured_values() {
    // An identity solution: the decoded argument is re-encoded by the
    // result converters, so the wire value must come back unchanged.
    let suite = TestSuite::new(
        "echo_points",
        "return the points unchanged",
        &[
            "list(object(int[x],float[y])<Point>)[pts]",
            "list(object(int[x],float[y])<Point>)",
        ],
    )
    .unwrap()
    .with_user_type(
        "Point",
        "class Point:\n\tdef __init__(self, x, y):\n\t\tself.x = x\n\t\tself.y = y",
    );
    let template = solution_template(&suite, Language::Python).unwrap();
    let solution = template.replace("pass", "return pts");
    let harness = test_harness(&suite, Language::Python, &solution).unwrap();

    let runner = TestRunner::new(PythonBackend::new());
    let logger = RecordingLogger::new();
    let wire = "[[1, 2.5], [3, 4.25]];[[1, 2.5], [3, 4.25]]";
    let outcome = runner.run(&harness.source, &cases(&[wire]), &logger).unwrap();

    assert_eq!(outcome, RunOutcome::Passed);
    assert!(logger.events().contains(&Event::Passed(1)));
}

#[test]
fn test_second_run_while_active_is_rejected() {
    let runner = Arc::new(TestRunner::new(ScriptBackend::new()));
    let handle = runner.cancel_handle();

    let background = {
        let runner = Arc::clone(&runner);
        thread::spawn(move || {
            let logger = RecordingLogger::new();
            runner.run("sleep 30\n", &cases(&["1;2;3"]), &logger)
        })
    };

    thread::sleep(Duration::from_millis(200));
    let logger = RecordingLogger::new();
    let err = runner.run(ECHO_SCRIPT, &cases(&["1;2;3"]), &logger).unwrap_err();
    assert!(matches!(err, RunError::AlreadyRunning));

    handle.cancel();
    let outcome = background.join().unwrap().unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
}
