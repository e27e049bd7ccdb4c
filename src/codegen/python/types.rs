use crate::error::GenerateError;
use crate::syntax::{TypeKind, TypeNode};

/// Renders the Python type hint for a node.
pub fn native_type(node: &TypeNode) -> Result<String, GenerateError> {
    Ok(match node.kind() {
        TypeKind::Void => "None".to_string(),
        TypeKind::Int | TypeKind::Long => "int".to_string(),
        TypeKind::Float => "float".to_string(),
        TypeKind::Bool => "bool".to_string(),
        TypeKind::String => "str".to_string(),
        TypeKind::Array | TypeKind::List => {
            format!("List[{}]", native_type(node.first_child())?)
        }
        TypeKind::Object => node.type_name().to_string(),
        TypeKind::Map => {
            return Err(GenerateError::UnsupportedType {
                language: super::LANGUAGE,
                kind: TypeKind::Map,
            });
        }
    })
}
