use super::LANGUAGE;
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;
use itertools::Itertools;

/// Decodes JSON wire values into native Python values. Argument types are
/// inferred by the interpreter and stay empty.
pub struct PythonInputConverter;

impl ConverterGenerator for PythonInputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "\treturn int(value)", "", "int"))
    }

    fn visit_long(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.visit_int(node, ctx)
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "\treturn float(value)", "", "float"))
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "\treturn bool(value)", "", "bool"))
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(node.name(), "\treturn str(value)", "", "str"))
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
        let ctor_args = children
            .iter()
            .enumerate()
            .map(|(slot, child)| format!("{}(value[{}])", child.fn_name, slot))
            .join(", ");
        let body = format!("\treturn {}({})", node.type_name(), ctor_args);
        Ok(ConverterFn::new(node.name(), &body, "", node.type_name()))
    }
}
