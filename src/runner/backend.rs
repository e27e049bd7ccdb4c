//! Per-language process profiles: file names, compile/run command lines and
//! diagnostic filtering. Toolchain binaries are externally configured; the
//! defaults assume they are on `PATH`.

use std::path::Path;

/// Everything the runner needs to know about one target language.
pub trait LanguageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// File name the harness source is written under.
    fn source_file_name(&self) -> &str;

    /// Compile command, or `None` for interpreted targets.
    fn compile_command(&self, src: &Path) -> Option<Vec<String>>;

    /// Command that runs the compiled or interpreted harness.
    fn run_command(&self, src: &Path) -> Vec<String>;

    /// Filters a raw diagnostic stream. Returns the user-facing message for
    /// genuine errors, with generated-file line numbers re-pointed into the
    /// user's own text via `user_line_offset`. Returns `None` for warnings
    /// and informational output.
    fn diagnostic(&self, raw: &str, src_path: &Path, user_line_offset: usize) -> Option<String>;
}

/// Rewrites `<file>:<line>` references so line numbers count from the start
/// of the user's solution instead of the generated file.
pub(crate) fn remap_lines(raw: &str, file_name: &str, offset: usize) -> String {
    let mut out = String::new();
    for line in raw.lines() {
        if let Some(pos) = line.find(file_name) {
            let after = &line[pos + file_name.len()..];
            if let Some(stripped) = after.strip_prefix(':') {
                let digits: String = stripped.chars().take_while(char::is_ascii_digit).collect();
                if let Ok(number) = digits.parse::<usize>() {
                    let rest = &stripped[digits.len()..];
                    out.push_str(&format!("line {}{}", number.saturating_sub(offset), rest));
                    out.push('\n');
                    continue;
                }
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// C++ backend: compiles with an external C++ compiler, runs the binary.
pub struct CppBackend {
    compiler: String,
}

impl CppBackend {
    pub fn new() -> Self {
        Self {
            compiler: "g++".to_string(),
        }
    }

    pub fn with_compiler(mut self, compiler: &str) -> Self {
        self.compiler = compiler.to_string();
        self
    }
}

impl Default for CppBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for CppBackend {
    fn name(&self) -> &'static str {
        "C++"
    }

    fn source_file_name(&self) -> &str {
        "solution.cpp"
    }

    fn compile_command(&self, src: &Path) -> Option<Vec<String>> {
        Some(vec![
            self.compiler.clone(),
            "-std=c++17".to_string(),
            "-O2".to_string(),
            "-o".to_string(),
            "solution".to_string(),
            src.display().to_string(),
        ])
    }

    fn run_command(&self, src: &Path) -> Vec<String> {
        let binary = src.with_file_name("solution");
        vec![binary.display().to_string()]
    }

    fn diagnostic(&self, raw: &str, _src_path: &Path, user_line_offset: usize) -> Option<String> {
        if !raw.contains("error") {
            return None;
        }
        Some(remap_lines(raw, self.source_file_name(), user_line_offset))
    }
}

/// Java backend: `javac` compile, `java` run of the generated `Runner` class.
pub struct JavaBackend {
    javac: String,
    java: String,
}

impl JavaBackend {
    pub fn new() -> Self {
        Self {
            javac: "javac".to_string(),
            java: "java".to_string(),
        }
    }

    pub fn with_toolchain(mut self, javac: &str, java: &str) -> Self {
        self.javac = javac.to_string();
        self.java = java.to_string();
        self
    }
}

impl Default for JavaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for JavaBackend {
    fn name(&self) -> &'static str {
        "Java"
    }

    fn source_file_name(&self) -> &str {
        "Solution.java"
    }

    fn compile_command(&self, src: &Path) -> Option<Vec<String>> {
        Some(vec![self.javac.clone(), src.display().to_string()])
    }

    fn run_command(&self, src: &Path) -> Vec<String> {
        let classpath = src
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        vec![
            self.java.clone(),
            "-cp".to_string(),
            classpath,
            "Runner".to_string(),
        ]
    }

    fn diagnostic(&self, raw: &str, _src_path: &Path, user_line_offset: usize) -> Option<String> {
        if !raw.contains("error") {
            return None;
        }
        Some(remap_lines(raw, self.source_file_name(), user_line_offset))
    }
}

/// Python backend: interpreted, no compile phase.
pub struct PythonBackend {
    interpreter: String,
}

impl PythonBackend {
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }
}

impl Default for PythonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for PythonBackend {
    fn name(&self) -> &'static str {
        "Python"
    }

    fn source_file_name(&self) -> &str {
        "solution.py"
    }

    fn compile_command(&self, _src: &Path) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, src: &Path) -> Vec<String> {
        vec![self.interpreter.clone(), src.display().to_string()]
    }

    fn diagnostic(&self, raw: &str, _src_path: &Path, user_line_offset: usize) -> Option<String> {
        // Interpreter warnings (deprecations and the like) are informational.
        if !raw.contains("Traceback") && !raw.contains("Error") {
            return None;
        }
        let mut message = String::new();
        for line in raw.lines() {
            if let Some(pos) = line.find(", line ") {
                let rest = &line[pos + ", line ".len()..];
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                if let Ok(number) = digits.parse::<usize>() {
                    message.push_str(&format!(
                        "{}, line {}{}",
                        &line[..pos],
                        number.saturating_sub(user_line_offset),
                        &rest[digits.len()..]
                    ));
                    message.push('\n');
                    continue;
                }
            }
            message.push_str(line);
            message.push('\n');
        }
        Some(message.trim_end().to_string())
    }
}
