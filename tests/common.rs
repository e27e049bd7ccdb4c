//! Common test utilities for building suites and capturing runner output.
use saiten::prelude::*;
use serde_json::Value;
use std::sync::Mutex;

/// Creates the simplest two-argument suite: `sum(a: int, b: int) -> int`.
#[allow(dead_code)]
pub fn sum_suite() -> TestSuite {
    TestSuite::new(
        "sum",
        "calculate sum of 2 numbers",
        &["int[a]", "int[b]", "int"],
    )
    .unwrap()
}

/// Creates a suite whose signature references a custom `Edge` object inside
/// a list. The per-language declaration is attached by the caller.
#[allow(dead_code)]
pub fn edges_suite() -> TestSuite {
    TestSuite::new(
        "count_edges",
        "count the edges heavier than the threshold",
        &[
            "list(object(int[a],int[b])<Edge>)[edges]",
            "int[threshold]",
            "int",
        ],
    )
    .unwrap()
}

/// One captured logger notification.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Event {
    Info(String),
    Error(String),
    Passed(usize),
    Failed { index: usize, expected: Value, actual: Value },
    Cancelled,
}

/// A logger that records every notification for later assertions.
#[allow(dead_code)]
pub struct RecordingLogger {
    events: Mutex<Vec<Event>>,
}

#[allow(dead_code)]
impl RecordingLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl TestLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Event::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }

    fn passed(&self, index: usize, _duration_ms: f64) {
        self.push(Event::Passed(index));
    }

    fn failed(&self, index: usize, _args: &str, expected: &Value, actual: &Value) {
        self.push(Event::Failed {
            index,
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }

    fn cancelled(&self) {
        self.push(Event::Cancelled);
    }
}
