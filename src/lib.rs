//! # Saiten - Polyglot Code-Grading Harness
//!
//! **Saiten** turns a typed function-signature description into runnable,
//! gradeable programs. From one compact grammar it generates, per target
//! language, the wire-decoding and encoding converters, an editable solution
//! template, and a complete test harness. A process runner then compiles the
//! assembled program, streams test cases into it line by line and adjudicates
//! each printed result record against the expected value.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the problem**: build a [`TestSuite`](suite::TestSuite) from
//!     grammar strings such as `"list(object(int[a],int[b])<Edge>)[edges]"`,
//!     one per argument plus a trailing one for the return type.
//! 2.  **Generate**: ask for a solution template in the target language, let
//!     the user fill it in, then assemble the full harness around their text.
//! 3.  **Run**: hand the harness source and the raw test-case lines to a
//!     [`TestRunner`](runner::TestRunner) with the matching language backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use saiten::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let suite = TestSuite::new(
//!         "add",
//!         "Return the sum of a and b.",
//!         &["int[a]", "int[b]", "int"],
//!     )?;
//!
//!     // The editable stub handed to the user.
//!     let template = solution_template(&suite, Language::Python)?;
//!     println!("{}", template);
//!
//!     // Later, with the user's finished text:
//!     let solution_src = template.replace("pass", "return a + b");
//!     let harness = test_harness(&suite, Language::Python, &solution_src)?;
//!
//!     let cases = vec!["1;2;3".to_string(), "40;2;42".to_string()];
//!     let runner = TestRunner::new(PythonBackend::new());
//!     let outcome = runner.run(&harness.source, &cases, &ConsoleLogger)?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod error;
pub mod prelude;
pub mod runner;
pub mod suite;
pub mod syntax;

use codegen::cpp::{CppHarnessGenerator, CppTemplateGenerator};
use codegen::java::{JavaHarnessGenerator, JavaTemplateGenerator};
use codegen::python::{PythonHarnessGenerator, PythonTemplateGenerator};
use codegen::{Harness, HarnessGenerator, TemplateGenerator};
use error::GenerateError;
use suite::TestSuite;

/// The supported target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    Java,
    Python,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Python => "Python",
        };
        write!(f, "{}", name)
    }
}

/// Generates the editable solution template for `suite` in `language`.
pub fn solution_template(suite: &TestSuite, language: Language) -> Result<String, GenerateError> {
    match language {
        Language::Cpp => CppTemplateGenerator.solution_template(suite),
        Language::Java => JavaTemplateGenerator.solution_template(suite),
        Language::Python => PythonTemplateGenerator.solution_template(suite),
    }
}

/// Assembles the complete runnable harness for `suite` in `language` around
/// the user's solution text.
pub fn test_harness(
    suite: &TestSuite,
    language: Language,
    solution_src: &str,
) -> Result<Harness, GenerateError> {
    match language {
        Language::Cpp => CppHarnessGenerator::new().generate(suite, solution_src),
        Language::Java => JavaHarnessGenerator::new().generate(suite, solution_src),
        Language::Python => PythonHarnessGenerator::new().generate(suite, solution_src),
    }
}
