//! Python target: the dynamic-scripting backend. Wire values arrive as
//! already-decoded JSON, so converter argument types stay inferred.

mod input;
mod output;
mod suite;
mod template;
mod types;

pub use input::PythonInputConverter;
pub use output::PythonOutputConverter;
pub use suite::PythonHarnessGenerator;
pub use template::PythonTemplateGenerator;
pub use types::native_type;

pub(crate) const LANGUAGE: &str = "Python";
