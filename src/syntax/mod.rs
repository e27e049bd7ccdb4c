//! The type descriptor model: a compact textual grammar parsed into an
//! immutable tree of typed nodes. Every downstream generator consumes this
//! tree read-only through a `kind`-directed dispatch.

mod parser;

use crate::error::GrammarError;
use std::fmt;

/// The closed set of type kinds the grammar can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    Int,
    Long,
    Float,
    Bool,
    String,
    Array,
    List,
    Map,
    Object,
}

impl TypeKind {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "void" => TypeKind::Void,
            "int" => TypeKind::Int,
            "long" => TypeKind::Long,
            "float" => TypeKind::Float,
            "bool" => TypeKind::Bool,
            "string" => TypeKind::String,
            "array" => TypeKind::Array,
            "list" => TypeKind::List,
            "map" => TypeKind::Map,
            "object" => TypeKind::Object,
            _ => return None,
        })
    }

    /// Fixed child arity, or `None` for `object` (one child per property).
    fn arity(self) -> Option<usize> {
        match self {
            TypeKind::Array | TypeKind::List => Some(1),
            TypeKind::Map => Some(2),
            TypeKind::Object => None,
            _ => Some(0),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Void => "void",
            TypeKind::Int => "int",
            TypeKind::Long => "long",
            TypeKind::Float => "float",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Array => "array",
            TypeKind::List => "list",
            TypeKind::Map => "map",
            TypeKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// One node in a parsed type descriptor tree.
///
/// The tree is immutable once parsed. `array`/`list` nodes have exactly one
/// child, `map` nodes two (key, value), `object` nodes one per declared
/// property in declaration order, scalars none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    kind: TypeKind,
    children: Vec<TypeNode>,
    /// Binding name (argument or property name). Empty for anonymous
    /// positions such as container elements.
    name: String,
    /// Declared class/struct name. Only meaningful for `object` nodes.
    type_name: String,
    /// The kind of the enclosing node, recorded at parse time. `None` for a
    /// top-level argument or return type.
    parent_kind: Option<TypeKind>,
}

impl TypeNode {
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn children(&self) -> &[TypeNode] {
        &self.children
    }

    pub fn first_child(&self) -> &TypeNode {
        &self.children[0]
    }

    /// The binding name this node is attached to, empty if anonymous.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user-visible class/struct name of an `object` node.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parent_kind(&self) -> Option<TypeKind> {
        self.parent_kind
    }

    /// Whether a scalar in this position renders as a boxed/nullable type in
    /// languages that distinguish boxed from primitive values. Object
    /// properties and generic container elements box; bare arguments and
    /// plain array elements stay primitive.
    pub fn is_boxed(&self) -> bool {
        matches!(
            self.parent_kind,
            Some(TypeKind::List) | Some(TypeKind::Map) | Some(TypeKind::Object)
        )
    }

    /// Total number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TypeNode::node_count).sum::<usize>()
    }
}

/// A parsed function signature: one tree per grammar string.
///
/// By convention the last string describes the return type and the ones
/// before it the arguments, but `parse` itself attaches no meaning to
/// positions.
pub struct SyntaxTree;

impl SyntaxTree {
    /// Parses a flat list of grammar strings of the form
    /// `kind(child1,child2,...)<DeclaredName>[bindingName]`.
    pub fn parse<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<TypeNode>, GrammarError> {
        exprs
            .iter()
            .map(|expr| parser::parse_expression(expr.as_ref()))
            .collect()
    }

    /// Parses a single grammar string into one type tree.
    pub fn parse_one(expr: &str) -> Result<TypeNode, GrammarError> {
        parser::parse_expression(expr)
    }
}
