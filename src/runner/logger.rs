//! The logger sink the runner reports through. Presentation (console
//! widgets, HTML panes) lives outside the core; this is the abstract seam.

use serde_json::Value;

/// Receives progress lines and per-test notifications during a run.
pub trait TestLogger: Send + Sync {
    /// Free-text progress output (compile phase notices, harness log lines).
    fn info(&self, message: &str);

    /// A diagnostic that terminated the run.
    fn error(&self, message: &str);

    /// Test case `index` (1-based) passed in `duration_ms` milliseconds.
    fn passed(&self, index: usize, duration_ms: f64);

    /// Test case `index` produced `actual` where `expected` was required.
    fn failed(&self, index: usize, args: &str, expected: &Value, actual: &Value);

    /// The run was cancelled; remaining test cases were skipped.
    fn cancelled(&self);
}

/// Prints progress to stdout and diagnostics to stderr.
pub struct ConsoleLogger;

impl TestLogger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn passed(&self, index: usize, duration_ms: f64) {
        println!("Test {} PASSED ({} ms)", index, duration_ms);
    }

    fn failed(&self, index: usize, args: &str, expected: &Value, actual: &Value) {
        println!(
            "Test {} FAILED: args {}, expected {}, got {}",
            index, args, expected, actual
        );
    }

    fn cancelled(&self) {
        println!("Cancelled");
    }
}
