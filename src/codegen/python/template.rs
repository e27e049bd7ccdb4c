use super::types::native_type;
use crate::codegen::TemplateGenerator;
use crate::error::GenerateError;
use crate::suite::TestSuite;
use itertools::Itertools;

/// Emits the Python solution scaffold a user edits.
pub struct PythonTemplateGenerator;

impl TemplateGenerator for PythonTemplateGenerator {
    fn solution_template(&self, suite: &TestSuite) -> Result<String, GenerateError> {
        let mut out = String::new();
        for type_name in suite.declared_types() {
            let declaration = suite.user_types.get(type_name).ok_or_else(|| {
                GenerateError::MissingTypeDefinition {
                    type_name: type_name.to_string(),
                }
            })?;
            out.push_str(declaration);
            out.push_str("\n\n");
        }
        let args = suite
            .args
            .iter()
            .map(|arg| Ok(format!("{}: {}", arg.name(), native_type(arg)?)))
            .collect::<Result<Vec<_>, GenerateError>>()?
            .iter()
            .join(", ");
        out.push_str(&format!(
            "def {}({}) -> {}:\n\t\"\"\"{}\"\"\"\n\t#Add code here\n\tpass\n",
            suite.fn_name,
            args,
            native_type(&suite.result)?,
            suite.description
        ));
        Ok(out)
    }
}
