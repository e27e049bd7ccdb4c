use crate::error::GenerateError;
use crate::syntax::{TypeKind, TypeNode};

/// Renders the native C++ type for a node. C++ has no boxed scalars, so the
/// container context never changes the rendering.
pub fn native_type(node: &TypeNode) -> Result<String, GenerateError> {
    Ok(match node.kind() {
        TypeKind::Void => "void".to_string(),
        TypeKind::Int => "int".to_string(),
        TypeKind::Long => "long int".to_string(),
        TypeKind::Float => "double".to_string(),
        TypeKind::Bool => "bool".to_string(),
        TypeKind::String => "string".to_string(),
        TypeKind::Array | TypeKind::List => {
            format!("vector<{}>", native_type(node.first_child())?)
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
