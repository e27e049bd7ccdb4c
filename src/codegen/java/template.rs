use super::types::native_type;
use crate::codegen::TemplateGenerator;
use crate::error::GenerateError;
use crate::suite::TestSuite;
use itertools::Itertools;

/// Emits the Java solution scaffold a user edits. Custom types become
/// static nested classes so the whole template stays a single source file.
pub struct JavaTemplateGenerator;

impl TemplateGenerator for JavaTemplateGenerator {
    fn solution_template(&self, suite: &TestSuite) -> Result<String, GenerateError> {
        let mut out = format!("/**\n* {}\n*/\n", suite.description);
        out.push_str("public class Solution {\n");
        for type_name in suite.declared_types() {
            let declaration = suite.user_types.get(type_name).ok_or_else(|| {
                GenerateError::MissingTypeDefinition {
                    type_name: type_name.to_string(),
                }
            })?;
            for line in declaration.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
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
            "    public {} {}({}) {{\n        //Add code here\n    }}\n}}\n",
            native_type(&suite.result)?,
            suite.fn_name,
            args
        ));
        Ok(out)
    }
}
