use super::{LANGUAGE, WIRE_TYPE};
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;

/// Decodes `jute::jValue` wire values into native C++ values.
pub struct CppInputConverter;

impl ConverterGenerator for CppInputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "return value.as_int();", WIRE_TYPE, "int"))
    }

    fn visit_long(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "return value.as_int();", WIRE_TYPE, "long int"))
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "return value.as_double();", WIRE_TYPE, "double"))
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "return value.as_bool();", WIRE_TYPE, "bool"))
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "return value.as_string();", WIRE_TYPE, "string"))
    }

    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.visit_list(node, ctx)
    }

    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let ret_type = format!("vector<{}>", child.ret_type);
        let body = format!(
            "{ret} result;\n\
             for (int i = 0; i < value.size(); i++) {{\n  \
             {child_ret} obj = {child_fn}(value[i]);\n  \
             result.push_back(obj);\n\
             }}\n\
             return result;",
            ret = ret_type,
            child_ret = child.ret_type,
            child_fn = child.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, &ret_type))
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
        let mut body = format!("{} obj;\n", node.type_name());
        for (slot, child) in children.iter().enumerate() {
            body.push_str(&format!(
                "obj.{} = {}(value[{}]);\n",
                child.prop_name, child.fn_name, slot
            ));
        }
        body.push_str("return obj;");
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, node.type_name()))
    }
}
