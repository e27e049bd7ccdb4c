use crate::error::GenerateError;
use crate::syntax::{TypeKind, TypeNode};

/// Renders the native Java type for a node. Scalars render boxed when the
/// node sits inside a generic container or is bound to an object property,
/// primitive otherwise.
pub fn native_type(node: &TypeNode) -> Result<String, GenerateError> {
    Ok(match node.kind() {
        TypeKind::Void => "void".to_string(),
        TypeKind::Int => scalar(node, "int", "Integer"),
        TypeKind::Long => scalar(node, "long", "Long"),
        TypeKind::Float => scalar(node, "double", "Double"),
        TypeKind::Bool => scalar(node, "boolean", "Boolean"),
        TypeKind::String => "String".to_string(),
        TypeKind::Array => format!("{}[]", native_type(node.first_child())?),
        TypeKind::List => format!("List<{}>", native_type(node.first_child())?),
        TypeKind::Map => format!(
            "Map<{}, {}>",
            native_type(&node.children()[0])?,
            native_type(&node.children()[1])?
        ),
        TypeKind::Object => node.type_name().to_string(),
    })
}

fn scalar(node: &TypeNode, primitive: &str, boxed: &str) -> String {
    if node.is_boxed() {
        boxed.to_string()
    } else {
        primitive.to_string()
    }
}
