use super::{LANGUAGE, WIRE_TYPE};
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;

/// Encodes native C++ values back into `jute::jValue` wire values.
pub struct CppOutputConverter;

impl CppOutputConverter {
    fn number(&self, node: &TypeNode, arg_type: &str) -> ConverterFn {
        let body = "jute::jValue result;\n\
                    result.set_type(jute::JNUMBER);\n\
                    result.set_string(std::to_string(value));\n\
                    return result;";
        ConverterFn::new(node.name(), body, arg_type, WIRE_TYPE)
    }
}

impl ConverterGenerator for CppOutputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.number(node, "int"))
    }

    fn visit_long(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.number(node, "long int"))
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.number(node, "double"))
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let body = "jute::jValue result;\n\
                    result.set_type(jute::JBOOLEAN);\n\
                    result.set_string(value ? \"true\" : \"false\");\n\
                    return result;";
        Ok(ConverterFn::new(node.name(), body, "bool", WIRE_TYPE))
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let body = "jute::jValue result;\n\
                    result.set_type(jute::JSTRING);\n\
                    result.set_string(value);\n\
                    return result;";
        Ok(ConverterFn::new(node.name(), body, "string", WIRE_TYPE))
    }

    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.visit_list(node, ctx)
    }

    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let arg_type = format!("vector<{}>", child.arg_type);
        let body = format!(
            "jute::jValue result;\n\
             result.set_type(jute::JARRAY);\n\
             for (int i = 0; i < value.size(); i++) {{\n  \
             result.add_element({child_fn}(value[i]));\n\
             }}\n\
             return result;",
            child_fn = child.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, &arg_type, WIRE_TYPE))
    }

    fn visit_map(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_object(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let children = node
            .children()
            .iter()
            .map(|child| self.render(child, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let mut body = String::from(
            "jute::jValue result;\n\
             result.set_type(jute::JOBJECT);\n\
             jute::jValue prop;\n",
        );
        for child in &children {
            body.push_str(&format!(
                "prop = {}(value.{});\nresult.add_property(\"{}\", prop);\n",
                child.fn_name, child.prop_name, child.prop_name
            ));
        }
        body.push_str("return result;");
        Ok(ConverterFn::new(node.name(), &body, node.type_name(), WIRE_TYPE))
    }
}
