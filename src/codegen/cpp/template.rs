use super::types::native_type;
use crate::codegen::TemplateGenerator;
use crate::error::GenerateError;
use crate::suite::TestSuite;
use itertools::Itertools;

/// Emits the C++ solution scaffold a user edits.
pub struct CppTemplateGenerator;

impl TemplateGenerator for CppTemplateGenerator {
    fn solution_template(&self, suite: &TestSuite) -> Result<String, GenerateError> {
        let mut out = format!("/**\n* {}\n*/\n", suite.description);
        for type_name in suite.declared_types() {
            let declaration = suite.user_types.get(type_name).ok_or_else(|| {
                GenerateError::MissingTypeDefinition {
                    type_name: type_name.to_string(),
                }
            })?;
            out.push_str(declaration);
            out.push('\n');
        }
        let args = suite
            .args
            .iter()
            .map(|arg| Ok(format!("{} {}", native_type(arg)?, arg.name())))
            .collect::<Result<Vec<_>, GenerateError>>()?
            .iter()
            .join(", ");
        out.push_str(&format!(
            "class Solution {{\npublic:\n    {} {}({}) {{\n        //Add code here\n    }}\n}};\n",
            native_type(&suite.result)?,
            suite.fn_name,
            args
        ));
        Ok(out)
    }
}
