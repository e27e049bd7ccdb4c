use super::LANGUAGE;
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;
use itertools::Itertools;

/// Encodes native Python values into their JSON wire representation.
/// Objects are lowered to positional value lists, mirroring the input side.
pub struct PythonOutputConverter;

impl PythonOutputConverter {
    fn identity(&self, node: &TypeNode, ret_type: &str) -> ConverterFn {
        ConverterFn::new(node.name(), "\treturn value", "", ret_type)
    }
}

impl ConverterGenerator for PythonOutputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.identity(node, "int"))
    }

    fn visit_long(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.visit_int(node, ctx)
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.identity(node, "float"))
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.identity(node, "bool"))
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(self.identity(node, "str"))
    }

    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.visit_list(node, ctx)
    }

    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let body = format!("\treturn [{}(item) for item in value]", child.fn_name);
        let ret_type = format!("List[{}]", child.ret_type);
        Ok(ConverterFn::new(node.name(), &body, "", &ret_type))
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
        let props = children
            .iter()
            .map(|child| format!("{}(value.{})", child.fn_name, child.prop_name))
            .join(", ");
        let body = format!("\treturn [{}]", props);
        Ok(ConverterFn::new(node.name(), &body, "", "List"))
    }
}
