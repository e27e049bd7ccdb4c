//! The code generation pipeline: a visitor contract every converter
//! generator implements, per-run synthetic-name state, and the assembly of
//! solution templates and runnable test harnesses.

pub mod cpp;
pub mod java;
pub mod python;

use crate::error::GenerateError;
use crate::suite::TestSuite;
use crate::syntax::{TypeKind, TypeNode};

/// Marker comment content emitted directly above the user's solution in a
/// generated harness. The runner locates it to translate compiler
/// diagnostics back to user-visible line numbers.
pub const USER_SRC_MARKER: &str = "==user solution==";

/// One generated decode/encode helper, tied to a single type node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConverterFn {
    /// Binding name propagated from the originating type node, empty if the
    /// node sits in an anonymous position.
    pub prop_name: String,
    /// Synthetic name, assigned by the generation context in emission order.
    pub fn_name: String,
    /// Generated statements forming the function body.
    pub body: String,
    /// Rendered wire type of the single parameter, empty if inferred.
    pub arg_type: String,
    /// Rendered native return type, empty if inferred.
    pub ret_type: String,
}

impl ConverterFn {
    pub fn new(prop_name: &str, body: &str, arg_type: &str, ret_type: &str) -> Self {
        Self {
            prop_name: prop_name.to_string(),
            fn_name: String::new(),
            body: body.to_string(),
            arg_type: arg_type.to_string(),
            ret_type: ret_type.to_string(),
        }
    }
}

/// Per-run code generation state: the monotonic synthetic-name counter and
/// the ordered list of every converter registered so far.
///
/// A fresh context is created for each top-level generation call and is
/// never shared between independent runs.
pub struct GenContext {
    prefix: &'static str,
    next: usize,
    converters: Vec<ConverterFn>,
}

impl GenContext {
    pub fn new() -> Self {
        Self::prefixed("converter")
    }

    /// A context whose synthetic names carry a different prefix. Used when
    /// one assembled program contains the output of more than one generation
    /// run and the name spaces must not collide.
    pub fn prefixed(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: 0,
            converters: Vec::new(),
        }
    }

    /// Assigns the next sequential synthetic name and records the converter.
    fn register(&mut self, mut draft: ConverterFn) -> ConverterFn {
        self.next += 1;
        draft.fn_name = format!("{}{}", self.prefix, self.next);
        self.converters.push(draft.clone());
        draft
    }

    /// Every converter registered so far, in emission order.
    pub fn converters(&self) -> &[ConverterFn] {
        &self.converters
    }

    pub fn into_converters(self) -> Vec<ConverterFn> {
        self.converters
    }
}

impl Default for GenContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The dispatch contract every converter generator implements.
///
/// All kind handlers are required methods: a generator that lacks a
/// capability implements the handler as an explicit
/// [`GenerateError::UnsupportedType`], so unsupported coverage is declared
/// rather than silently wrong.
pub trait ConverterGenerator {
    /// Target language label used in error reporting.
    fn language(&self) -> &'static str;

    fn visit_void(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_int(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_long(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_float(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_bool(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_string(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_array(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_list(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_map(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;
    fn visit_object(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError>;

    /// Single entry point: dispatches on the node's kind, registers the
    /// produced converter (children recurse through `render` first, so they
    /// are always registered before their parent) and returns it.
    fn render(&self, node: &TypeNode, ctx: &mut GenContext) -> Result<ConverterFn, GenerateError> {
        let draft = match node.kind() {
            TypeKind::Void => self.visit_void(node, ctx),
            TypeKind::Int => self.visit_int(node, ctx),
            TypeKind::Long => self.visit_long(node, ctx),
            TypeKind::Float => self.visit_float(node, ctx),
            TypeKind::Bool => self.visit_bool(node, ctx),
            TypeKind::String => self.visit_string(node, ctx),
            TypeKind::Array => self.visit_array(node, ctx),
            TypeKind::List => self.visit_list(node, ctx),
            TypeKind::Map => self.visit_map(node, ctx),
            TypeKind::Object => self.visit_object(node, ctx),
        }?;
        Ok(ctx.register(draft))
    }

    /// Renders every node of a signature slice with a fresh context.
    ///
    /// Returns the entry converter for each top-level node plus the full
    /// ordered list of all converters produced during the traversal.
    fn converters_for(
        &self,
        nodes: &[TypeNode],
    ) -> Result<(Vec<ConverterFn>, Vec<ConverterFn>), GenerateError> {
        let mut ctx = GenContext::new();
        let entries = nodes
            .iter()
            .map(|node| self.render(node, &mut ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((entries, ctx.into_converters()))
    }

    /// Shorthand for refusing a node kind.
    fn unsupported(&self, node: &TypeNode) -> GenerateError {
        GenerateError::UnsupportedType {
            language: self.language(),
            kind: node.kind(),
        }
    }
}

/// Emits the editable solution scaffold for one language: description
/// comment, referenced custom type declarations, and an empty-bodied stub
/// with the correct argument and return types.
pub trait TemplateGenerator {
    fn solution_template(&self, suite: &TestSuite) -> Result<String, GenerateError>;
}

/// A fully assembled runnable program.
#[derive(Debug, Clone)]
pub struct Harness {
    /// Complete source: imports, user solution, converters, driving loop.
    pub source: String,
    /// 1-based line number of the user-source marker. Diagnostics at lines
    /// beyond this offset belong to the user's own text.
    pub user_src_line: usize,
}

/// Assembles the full test harness source for one language.
pub trait HarnessGenerator {
    fn line_comment(&self) -> &'static str;
    fn imports(&self) -> &'static str;
    fn input_generator(&self) -> &dyn ConverterGenerator;
    fn output_generator(&self) -> &dyn ConverterGenerator;

    /// Renders one converter as a real function definition.
    fn converter_definition(&self, converter: &ConverterFn) -> String;

    /// Renders the driving loop: read test-case lines, decode arguments via
    /// the entry input converters, invoke the solution under a millisecond
    /// clock, encode through the output entry and print one record per case.
    fn driver(&self, suite: &TestSuite, inputs: &[ConverterFn], output: &ConverterFn) -> String;

    /// Everything that follows the user's solution: converter definitions in
    /// emission order, then the driving loop. Languages that need an
    /// enclosing construct (a Java class, say) override this.
    fn scaffolding(
        &self,
        suite: &TestSuite,
        converters: &[ConverterFn],
        inputs: &[ConverterFn],
        output: &ConverterFn,
    ) -> String {
        let mut out = String::new();
        for converter in converters {
            out.push_str(&self.converter_definition(converter));
            out.push('\n');
        }
        out.push_str(&self.driver(suite, inputs, output));
        out
    }

    fn generate(&self, suite: &TestSuite, solution_src: &str) -> Result<Harness, GenerateError> {
        let (input_entries, input_all) = self.input_generator().converters_for(&suite.args)?;

        // The output run gets its own fresh context; the "encoder" prefix
        // keeps its names disjoint from the input namespace within the one
        // assembled program.
        let mut out_ctx = GenContext::prefixed("encoder");
        let output_entry = self.output_generator().render(&suite.result, &mut out_ctx)?;
        let output_all = out_ctx.into_converters();

        let mut converters = input_all;
        converters.extend(output_all);

        let mut source = String::new();
        source.push_str(self.imports());
        source.push_str("\n\n");
        source.push_str(&format!("{} {}\n", self.line_comment(), USER_SRC_MARKER));
        let user_src_line = source.lines().count();
        source.push_str(solution_src);
        source.push_str("\n\n");
        source.push_str(&self.scaffolding(suite, &converters, &input_entries, &output_entry));
        source.push('\n');

        Ok(Harness {
            source,
            user_src_line,
        })
    }
}

/// Finds the 1-based line number of the user-source marker in an assembled
/// harness. Lines at or before it belong to generated scaffolding.
pub fn user_src_offset(source: &str) -> Option<usize> {
    source
        .lines()
        .position(|line| line.contains(USER_SRC_MARKER))
        .map(|idx| idx + 1)
}
