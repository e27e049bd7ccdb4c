//! The test suite descriptor: everything the generators need to know about
//! one problem. Created once, consumed read-only by every generation pass.

use crate::error::GrammarError;
use crate::syntax::{SyntaxTree, TypeKind, TypeNode};
use ahash::AHashMap;

/// Describes a single typed function-signature problem.
#[derive(Debug, Clone)]
pub struct TestSuite {
    /// Name of the function the user has to implement.
    pub fn_name: String,
    /// Free-text problem description, emitted as the template's doc comment.
    pub description: String,
    /// Argument types in declaration order, each carrying its binding name.
    pub args: Vec<TypeNode>,
    /// The result type.
    pub result: TypeNode,
    /// Per-language member-field source for every custom type referenced by
    /// the signature, keyed by declared type name.
    pub user_types: AHashMap<String, String>,
}

impl TestSuite {
    /// Builds a suite from grammar strings: one per argument plus a trailing
    /// string for the return type.
    pub fn new<S: AsRef<str>>(
        fn_name: &str,
        description: &str,
        grammar: &[S],
    ) -> Result<Self, GrammarError> {
        let mut nodes = SyntaxTree::parse(grammar)?;
        let result = nodes.pop().ok_or(GrammarError::EmptyExpression)?;
        Ok(Self {
            fn_name: fn_name.to_string(),
            description: description.to_string(),
            args: nodes,
            result,
            user_types: AHashMap::new(),
        })
    }

    pub fn with_user_type(mut self, type_name: &str, declaration: &str) -> Self {
        self.user_types
            .insert(type_name.to_string(), declaration.to_string());
        self
    }

    /// Declared custom type names referenced by the signature, in order of
    /// first appearance. Drives deterministic type-declaration emission.
    pub fn declared_types(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for node in self.args.iter().chain(std::iter::once(&self.result)) {
            collect_declared_types(node, &mut names);
        }
        names
    }
}

fn collect_declared_types<'a>(node: &'a TypeNode, names: &mut Vec<&'a str>) {
    if node.kind() == TypeKind::Object && !names.contains(&node.type_name()) {
        names.push(node.type_name());
    }
    for child in node.children() {
        collect_declared_types(child, names);
    }
}
