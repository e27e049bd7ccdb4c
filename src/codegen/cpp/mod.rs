//! C++ target: converters over the `jute::jValue` wire type, solution
//! templates and harness assembly.

mod input;
mod output;
mod suite;
mod template;
mod types;

pub use input::CppInputConverter;
pub use output::CppOutputConverter;
pub use suite::CppHarnessGenerator;
pub use template::CppTemplateGenerator;
pub use types::native_type;

pub(crate) const LANGUAGE: &str = "C++";
pub(crate) const WIRE_TYPE: &str = "jute::jValue";
