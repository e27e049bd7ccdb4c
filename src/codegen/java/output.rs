use super::types::native_type;
use super::LANGUAGE;
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;

/// Encodes native Java values into their wire representation. Scalars,
/// arrays and lists are Jackson-serializable as-is; maps and objects are
/// lowered to flat value lists.
pub struct JavaOutputConverter;

impl JavaOutputConverter {
    fn identity(&self, node: &TypeNode) -> Result<ConverterFn, GenerateError> {
        let t = native_type(node)?;
        Ok(ConverterFn::new(node.name(), "return value;", &t, &t))
    }
}

impl ConverterGenerator for JavaOutputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.identity(node)
    }

    fn visit_long(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.identity(node)
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.identity(node)
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.identity(node)
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.identity(node)
    }

    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let t = format!("{}[]", child.ret_type);
        Ok(ConverterFn::new(node.name(), "return value;", &t, &t))
    }

    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let t = format!("List<{}>", child.ret_type);
        Ok(ConverterFn::new(node.name(), "return value;", &t, &t))
    }

    fn visit_map(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let key = self.render(&node.children()[0], ctx)?;
        let val = self.render(&node.children()[1], ctx)?;
        let arg_type = format!("Map<{}, {}>", key.arg_type, val.arg_type);
        let body = format!(
            "List result = new ArrayList();\n\
             for (Map.Entry<{key_t}, {val_t}> entry : value.entrySet()) {{\n    \
             result.add({key_fn}(entry.getKey()));\n    \
             result.add({val_fn}(entry.getValue()));\n\
             }}\n\
             return result;",
            key_t = key.arg_type,
            val_t = val.arg_type,
            key_fn = key.fn_name,
            val_fn = val.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, &arg_type, "List"))
    }

    fn visit_object(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let children = node
            .children()
            .iter()
            .map(|child| self.render(child, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let mut body = String::from("List result = new ArrayList();\n");
        for child in &children {
            body.push_str(&format!(
                "result.add({}(value.{}));\n",
                child.fn_name, child.prop_name
            ));
        }
        body.push_str("return result;");
        Ok(ConverterFn::new(node.name(), &body, node.type_name(), "List"))
    }
}
