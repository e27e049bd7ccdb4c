//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types so typical callers only need a
//! single `use saiten::prelude::*;`.
//!
//! # Example
//!
//! ```rust,no_run
//! use saiten::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let suite = TestSuite::new("add", "Sum two ints.", &["int[a]", "int[b]", "int"])?;
//! let template = solution_template(&suite, Language::Cpp)?;
//! println!("{}", template);
//! # Ok(())
//! # }
//! ```

// Suite description and generation entry points
pub use crate::suite::TestSuite;
pub use crate::{solution_template, test_harness, Language};

// Grammar types
pub use crate::syntax::{SyntaxTree, TypeKind, TypeNode};

// Generated artifacts
pub use crate::codegen::{ConverterFn, Harness};

// Runner
pub use crate::runner::{
    CancelHandle, ConsoleLogger, CppBackend, FailureKind, JavaBackend, LanguageBackend,
    PythonBackend, RunOutcome, TestLogger, TestRunner,
};

// Error types
pub use crate::error::{GenerateError, GrammarError, RunError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
