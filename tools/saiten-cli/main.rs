use clap::{Parser, ValueEnum};
use saiten::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the `problem.json` format and are only used here.

#[derive(Deserialize)]
struct RawProblem {
    #[serde(alias = "functionName")]
    function_name: String,
    description: String,
    /// One grammar string per argument plus a trailing one for the result.
    grammar: Vec<String>,
    /// Per-type source declarations for the chosen language, keyed by name.
    #[serde(default, alias = "userTypes")]
    user_types: HashMap<String, String>,
    /// Raw semicolon-delimited test-case lines.
    #[serde(default, alias = "testCases")]
    test_cases: Vec<String>,
}

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LanguageCli {
    Cpp,
    Java,
    Python,
}

impl From<LanguageCli> for Language {
    fn from(cli: LanguageCli) -> Self {
        match cli {
            LanguageCli::Cpp => Language::Cpp,
            LanguageCli::Java => Language::Java,
            LanguageCli::Python => Language::Python,
        }
    }
}

/// A polyglot code-grading harness CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the problem definition JSON file
    problem_path: String,

    /// Path to the user's solution source; omit to print the template
    solution_path: Option<String>,

    /// The target language
    #[arg(short, long, value_enum)]
    language: LanguageCli,
}

fn main() {
    let cli = Cli::parse();
    let language: Language = cli.language.into();

    let problem_json = fs::read_to_string(&cli.problem_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read problem file '{}': {}",
            &cli.problem_path, e
        ))
    });
    let raw: RawProblem = serde_json::from_str(&problem_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse problem JSON: {}", e)));

    let mut suite = TestSuite::new(&raw.function_name, &raw.description, &raw.grammar)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid type grammar: {}", e)));
    for (type_name, declaration) in &raw.user_types {
        suite = suite.with_user_type(type_name, declaration);
    }

    match cli.solution_path {
        None => print_template(&suite, language),
        Some(path) => grade_solution(&suite, language, &path, &raw.test_cases),
    }
}

fn print_template(suite: &TestSuite, language: Language) {
    let template = solution_template(suite, language)
        .unwrap_or_else(|e| exit_with_error(&format!("Template generation failed: {}", e)));
    print!("{}", template);
}

fn grade_solution(suite: &TestSuite, language: Language, solution_path: &str, cases: &[String]) {
    if cases.is_empty() {
        exit_with_error("The problem definition has no test cases to grade against.");
    }
    let solution_src = fs::read_to_string(solution_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read solution file '{}': {}",
            solution_path, e
        ))
    });

    let generate_start = Instant::now();
    let harness = test_harness(suite, language, &solution_src)
        .unwrap_or_else(|e| exit_with_error(&format!("Harness generation failed: {}", e)));
    let generate_duration = generate_start.elapsed();

    let run_start = Instant::now();
    let outcome = match language {
        Language::Cpp => run(CppBackend::new(), &harness.source, cases),
        Language::Java => run(JavaBackend::new(), &harness.source, cases),
        Language::Python => run(PythonBackend::new(), &harness.source, cases),
    };
    let run_duration = run_start.elapsed();

    println!("\n--- Grading Summary ---");
    println!("Language:           {}", language);
    println!("Test Cases:         {}", cases.len());
    println!("Harness Generation: {:?}", generate_duration);
    println!("Test Run:           {:?}", run_duration);

    match outcome {
        RunOutcome::Passed => println!("Verdict:            PASSED"),
        RunOutcome::Failed(kind) => {
            println!("Verdict:            FAILED ({:?})", kind);
            std::process::exit(1);
        }
        RunOutcome::Cancelled => println!("Verdict:            CANCELLED"),
    }
}

fn run<B: LanguageBackend>(backend: B, source: &str, cases: &[String]) -> RunOutcome {
    let runner = TestRunner::new(backend);
    runner
        .run(source, cases, &ConsoleLogger)
        .unwrap_or_else(|e| exit_with_error(&format!("Test run failed: {}", e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
