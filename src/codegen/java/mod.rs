//! Java target: converters over the Jackson `JsonNode` wire type, solution
//! templates and harness assembly. The only bundled target with `map`
//! support in both directions (maps travel as flat key/value arrays).

mod input;
mod output;
mod suite;
mod template;
mod types;

pub use input::JavaInputConverter;
pub use output::JavaOutputConverter;
pub use suite::JavaHarnessGenerator;
pub use template::JavaTemplateGenerator;
pub use types::native_type;

pub(crate) const LANGUAGE: &str = "Java";
pub(crate) const WIRE_TYPE: &str = "JsonNode";
