use super::types::native_type;
use super::{LANGUAGE, WIRE_TYPE};
use crate::codegen::{ConverterFn, ConverterGenerator, GenContext};
use crate::error::GenerateError;
use crate::syntax::TypeNode;

/// Decodes Jackson `JsonNode` wire values into native Java values.
pub struct JavaInputConverter;

impl JavaInputConverter {
    fn scalar(&self, node: &TypeNode, accessor: &str) -> Result<ConverterFn, GenerateError> {
        Ok(ConverterFn::new(
            node.name(),
            &format!("return value.{}();", accessor),
            WIRE_TYPE,
            &native_type(node)?,
        ))
    }
}

impl ConverterGenerator for JavaInputConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn visit_void(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        Err(self.unsupported(node))
    }

    fn visit_int(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.scalar(node, "asInt")
    }

    fn visit_long(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.scalar(node, "asLong")
    }

    fn visit_float(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.scalar(node, "asDouble")
    }

    fn visit_bool(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.scalar(node, "asBoolean")
    }

    fn visit_string(&self, node: &TypeNode, _ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        self.scalar(node, "asText")
    }

    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let ret_type = format!("{}[]", child.ret_type);
        let body = format!(
            "{child_ret}[] result = new {child_ret}[value.size()];\n\
             int i = 0;\n\
             for (JsonNode node : value) {{\n    \
             result[i++] = {child_fn}(node);\n\
             }}\n\
             return result;",
            child_ret = child.ret_type,
            child_fn = child.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, &ret_type))
    }

    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let child = self.render(node.first_child(), ctx)?;
        let ret_type = format!("List<{}>", child.ret_type);
        let body = format!(
            "{ret} result = new ArrayList<>();\n\
             for (JsonNode node : value) {{\n    \
             result.add({child_fn}(node));\n\
             }}\n\
             return result;",
            ret = ret_type,
            child_fn = child.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, &ret_type))
    }

    // Maps travel as flat [key, value, key, value, ...] arrays.
    fn visit_map(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let key = self.render(&node.children()[0], ctx)?;
        let val = self.render(&node.children()[1], ctx)?;
        let ret_type = format!("Map<{}, {}>", key.ret_type, val.ret_type);
        let body = format!(
            "{ret} result = new HashMap<>();\n\
             for (int i = 0; i < value.size(); i += 2) {{\n    \
             result.put({key_fn}(value.get(i)), {val_fn}(value.get(i + 1)));\n\
             }}\n\
             return result;",
            ret = ret_type,
            key_fn = key.fn_name,
            val_fn = val.fn_name,
        );
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, &ret_type))
    }

    fn visit_object(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let children = node
            .children()
            .iter()
            .map(|child| self.render(child, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let mut body = format!("{t} result = new {t}();\n", t = node.type_name());
        for (slot, child) in children.iter().enumerate() {
            body.push_str(&format!(
                "result.{} = {}(value.get({}));\n",
                child.prop_name, child.fn_name, slot
            ));
        }
        body.push_str("return result;");
        Ok(ConverterFn::new(node.name(), &body, WIRE_TYPE, node.type_name()))
    }
}
