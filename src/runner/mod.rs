//! The process test runner: compiles and runs a generated harness, streams
//! test cases into it, drains its two output streams concurrently and
//! adjudicates pass/fail.

mod backend;
pub mod compare;
mod logger;
mod record;

pub use backend::{CppBackend, JavaBackend, LanguageBackend, PythonBackend};
pub use logger::{ConsoleLogger, TestLogger};
pub use record::{split_fields, TestRecord};

use crate::codegen::user_src_offset;
use crate::error::RunError;
use compare::values_match;
use itertools::Itertools;
use serde_json::Value;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};
use std::time::Duration;
use std::{fs, thread};

/// Why a run was adjudicated as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The compile phase produced diagnostics; no process was run.
    Compile,
    /// The process died, closed a stream, or emitted error diagnostics
    /// where a result was expected.
    Runtime,
    /// A test case's actual result differed from the expected value.
    Assertion,
}

/// Final adjudication of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every test case passed.
    Passed,
    /// The run halted; remaining test cases were not executed (fail-fast).
    Failed(FailureKind),
    /// The run was cancelled; skipped cases are not marked failed.
    Cancelled,
}

/// How long the adjudication loop sleeps between queue polls.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

static RUN_SEQ: AtomicU64 = AtomicU64::new(0);

struct RunnerShared {
    stopped: AtomicBool,
    active: AtomicBool,
    child: Mutex<Option<Child>>,
}

impl RunnerShared {
    fn child_slot(&self) -> MutexGuard<'_, Option<Child>> {
        // A poisoned lock only means another thread panicked mid-update;
        // the child handle itself is still valid.
        self.child.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Cancels an in-flight run from another thread: sets the cooperative stop
/// flag and hard-kills the harness process.
pub struct CancelHandle {
    shared: Arc<RunnerShared>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
        if let Some(child) = self.shared.child_slot().as_mut() {
            let _ = child.kill();
        }
    }
}

/// Drives one harness process at a time through
/// `idle → compiling → running → {passed, failed, cancelled}`.
///
/// A runner instance is single-flight: a second `run` while one is active
/// fails with [`RunError::AlreadyRunning`]. After any outcome the runner is
/// idle again and may be reused.
pub struct TestRunner<B: LanguageBackend> {
    backend: B,
    shared: Arc<RunnerShared>,
}

impl<B: LanguageBackend> TestRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shared: Arc::new(RunnerShared {
                stopped: AtomicBool::new(false),
                active: AtomicBool::new(false),
                child: Mutex::new(None),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Compiles (if the target needs it) and runs `source`, feeding
    /// `test_cases` one line at a time and adjudicating each printed result
    /// record. Every exit path releases the process and returns the runner
    /// to idle.
    pub fn run(
        &self,
        source: &str,
        test_cases: &[String],
        logger: &dyn TestLogger,
    ) -> Result<RunOutcome, RunError> {
        if self.shared.active.swap(true, Ordering::SeqCst) {
            return Err(RunError::AlreadyRunning);
        }
        self.shared.stopped.store(false, Ordering::SeqCst);

        let workdir = std::env::temp_dir().join(format!(
            "saiten-{}-{}",
            std::process::id(),
            RUN_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        let result = self.run_inner(&workdir, source, test_cases, logger);

        if let Some(mut child) = self.shared.child_slot().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = fs::remove_dir_all(&workdir);
        self.shared.active.store(false, Ordering::SeqCst);
        result
    }

    fn run_inner(
        &self,
        workdir: &Path,
        source: &str,
        test_cases: &[String],
        logger: &dyn TestLogger,
    ) -> Result<RunOutcome, RunError> {
        fs::create_dir_all(workdir)?;
        let src_path = workdir.join(self.backend.source_file_name());
        fs::write(&src_path, source)?;
        let offset = user_src_offset(source).unwrap_or(0);

        if let Some(cmd) = self.backend.compile_command(&src_path) {
            logger.info("Compiling...");
            log::debug!("[{}] compile: {:?}", self.backend.name(), cmd);
            let mut child = Command::new(&cmd[0])
                .args(&cmd[1..])
                .current_dir(workdir)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| RunError::Spawn {
                    command: cmd.join(" "),
                    source: e,
                })?;
            let stderr_rx = spawn_line_reader(child.stderr.take());
            // Register the compiler in the shared slot so a cancel issued
            // while compiling kills it instead of waiting it out.
            *self.shared.child_slot() = Some(child);
            if self.stopped() {
                if let Some(child) = self.shared.child_slot().as_mut() {
                    let _ = child.kill();
                }
            }

            // The reader disconnects when the compiler exits or is killed.
            let mut diagnostics = StderrTail::new();
            for line in stderr_rx.iter() {
                diagnostics.push(line);
            }
            if let Some(mut child) = self.shared.child_slot().take() {
                let _ = child.wait();
            }
            if self.stopped() {
                logger.cancelled();
                return Ok(RunOutcome::Cancelled);
            }
            let raw = diagnostics.render();
            if !raw.trim().is_empty() {
                if let Some(message) = self.backend.diagnostic(&raw, &src_path, offset) {
                    logger.error(&message);
                    return Ok(RunOutcome::Failed(FailureKind::Compile));
                }
            }
        }

        logger.info("Running tests...");
        let cmd = self.backend.run_command(&src_path);
        log::debug!("[{}] run: {:?}", self.backend.name(), cmd);
        let mut child = Command::new(&cmd[0])
            .args(&cmd[1..])
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RunError::Spawn {
                command: cmd.join(" "),
                source: e,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("harness stdin was not captured"))?;
        // Two independent readers so a blocked pipe on one stream can never
        // stall draining of the other.
        let stdout_rx = spawn_line_reader(child.stdout.take());
        let stderr_rx = spawn_line_reader(child.stderr.take());
        *self.shared.child_slot() = Some(child);

        let mut stderr = StderrTail::new();
        for (index, test_case) in test_cases.iter().enumerate() {
            let index = index + 1;
            if self.stopped() {
                logger.cancelled();
                return Ok(RunOutcome::Cancelled);
            }
            if let Some(status) = self.shared.child_slot().as_mut().and_then(|c| c.try_wait().ok().flatten()) {
                logger.error(&format!(
                    "The harness process terminated unexpectedly ({})",
                    status
                ));
                return Ok(RunOutcome::Failed(FailureKind::Runtime));
            }

            let fields = split_fields(test_case);
            let expected: Value = serde_json::from_str(fields[fields.len() - 1].trim())
                .map_err(|e| RunError::MalformedTestCase {
                    index,
                    message: e.to_string(),
                })?;
            let args_repr = format!("[{}]", fields[..fields.len() - 1].join(","));

            if writeln!(stdin, "{}", test_case).and_then(|_| stdin.flush()).is_err() {
                if self.stopped() {
                    logger.cancelled();
                    return Ok(RunOutcome::Cancelled);
                }
                logger.error("The harness input stream closed unexpectedly");
                return Ok(RunOutcome::Failed(FailureKind::Runtime));
            }

            let record = match self.await_record(&stdout_rx, &stderr_rx, &mut stderr, &src_path, offset, logger)? {
                Await::Record(record) => record,
                Await::Cancelled => {
                    logger.cancelled();
                    return Ok(RunOutcome::Cancelled);
                }
                Await::Fault => return Ok(RunOutcome::Failed(FailureKind::Runtime)),
            };

            let actual = record.result.clone().unwrap_or(Value::Null);
            if values_match(&actual, &expected) {
                logger.passed(index, record.duration.unwrap_or(0.0));
            } else {
                logger.failed(index, &args_repr, &expected, &actual);
                return Ok(RunOutcome::Failed(FailureKind::Assertion));
            }
        }

        if self.stopped() {
            logger.cancelled();
            return Ok(RunOutcome::Cancelled);
        }
        logger.info("All tests PASSED");
        Ok(RunOutcome::Passed)
    }

    /// Polls both stream queues until a genuine result record arrives, the
    /// run is cancelled, or the process faults. Non-record stdout lines are
    /// forwarded to the logger; stderr is screened through the backend's
    /// diagnostic filter whenever new lines arrive.
    fn await_record(
        &self,
        stdout_rx: &Receiver<String>,
        stderr_rx: &Receiver<String>,
        stderr: &mut StderrTail,
        src_path: &Path,
        offset: usize,
        logger: &dyn TestLogger,
    ) -> Result<Await, RunError> {
        loop {
            if self.stopped() {
                return Ok(Await::Cancelled);
            }
            let mut grew = false;
            while let Ok(line) = stderr_rx.try_recv() {
                stderr.push(line);
                grew = true;
            }
            if grew {
                if let Some(message) = self.backend.diagnostic(&stderr.render(), src_path, offset) {
                    logger.error(&message);
                    return Ok(Await::Fault);
                }
            }
            match stdout_rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => match TestRecord::parse(&line) {
                    Some(record) if record.is_result() => return Ok(Await::Record(record)),
                    _ => logger.info(line.trim_end()),
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if self.stopped() {
                        return Ok(Await::Cancelled);
                    }
                    // Output closed without a record; give stderr one last
                    // chance to explain why.
                    while let Ok(line) = stderr_rx.recv_timeout(POLL_INTERVAL) {
                        stderr.push(line);
                    }
                    if let Some(message) = self.backend.diagnostic(&stderr.render(), src_path, offset) {
                        logger.error(&message);
                    } else {
                        logger.error("The harness terminated before producing a result");
                    }
                    return Ok(Await::Fault);
                }
            }
        }
    }

    fn stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }
}

enum Await {
    Record(TestRecord),
    Cancelled,
    Fault,
}

/// Byte-capped rolling window over the newest stderr lines. A chatty
/// process can run for hours; diagnostics worth reporting are at the tail.
struct StderrTail {
    lines: VecDeque<String>,
    bytes: usize,
}

impl StderrTail {
    /// Retained-byte budget across all lines.
    const LIMIT: usize = 64 * 1024;

    fn new() -> Self {
        Self {
            lines: VecDeque::new(),
            bytes: 0,
        }
    }

    /// Appends a line, evicting the oldest whole lines once over budget.
    /// The newest line is always kept, even when it alone exceeds the cap.
    fn push(&mut self, line: String) {
        self.bytes += line.len() + 1;
        self.lines.push_back(line);
        while self.bytes > Self::LIMIT && self.lines.len() > 1 {
            if let Some(evicted) = self.lines.pop_front() {
                self.bytes -= evicted.len() + 1;
            }
        }
    }

    fn render(&self) -> String {
        self.lines.iter().join("\n")
    }
}

/// Spawns a dedicated reader thread pushing whole lines from one process
/// stream into a queue. The thread exits when the stream closes or the
/// receiving side is dropped.
fn spawn_line_reader<R: Read + Send + 'static>(stream: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    if let Some(stream) = stream {
        thread::spawn(move || {
            let reader = BufReader::new(stream);
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });
    }
    rx
}
