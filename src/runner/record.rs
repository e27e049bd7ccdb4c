//! The structured line a harness prints per test case: the single contract
//! between generated programs and the runner, stable across all targets.

use serde::Deserialize;
use serde_json::Value;

/// One result record parsed from the harness's result stream.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRecord {
    #[serde(default)]
    pub expected: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub args: Option<Value>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl TestRecord {
    /// Attempts to parse a stream line as a record. Lines that are not JSON
    /// objects are plain log output.
    pub fn parse(line: &str) -> Option<Self> {
        serde_json::from_str(line).ok()
    }

    /// A record missing both `result` and `duration` is an intermediate
    /// progress line, not an adjudicable result.
    pub fn is_result(&self) -> bool {
        self.result.is_some() || self.duration.is_some()
    }
}

/// Splits a test-case line on `;`, honoring backslash-escaped literal
/// semicolons inside fields.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&';') {
            current.push(';');
            chars.next();
        } else if c == ';' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}
