//! Tests for the converter generators and harness assembly.
mod common;
use common::{edges_suite, sum_suite};
use saiten::codegen::cpp::{CppInputConverter, CppOutputConverter};
use saiten::codegen::java::{JavaInputConverter, JavaOutputConverter};
use saiten::codegen::python::{PythonInputConverter, PythonOutputConverter};
use saiten::codegen::{user_src_offset, ConverterGenerator, GenContext, USER_SRC_MARKER};
use saiten::error::GenerateError;
use saiten::prelude::*;

#[test]
fn test_synthetic_names_are_sequential_children_first() {
    let node = SyntaxTree::parse_one("list(object(int[a],int[b])<Edge>)[edges]").unwrap();
    let (entries, all) = CppInputConverter.converters_for(&[node]).unwrap();

    let names: Vec<&str> = all.iter().map(|c| c.fn_name.as_str()).collect();
    assert_eq!(names, vec!["converter1", "converter2", "converter3", "converter4"]);

    // The object is registered after its properties and references them only
    // by their synthetic names.
    let object = &all[2];
    assert!(object.body.contains("obj.a = converter1(value[0]);"));
    assert!(object.body.contains("obj.b = converter2(value[1]);"));

    // The list is the entry converter and calls the object converter.
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].fn_name, "converter4");
    assert!(entries[0].body.contains("converter3(value[i])"));
}

#[test]
fn test_each_generation_run_gets_a_fresh_counter() {
    let node = SyntaxTree::parse_one("list(int)").unwrap();
    let (first, _) = CppInputConverter.converters_for(&[node.clone()]).unwrap();
    let (second, _) = CppInputConverter.converters_for(&[node]).unwrap();
    assert_eq!(first[0].fn_name, second[0].fn_name);
}

#[test]
fn test_prefixed_context_keeps_namespaces_disjoint() {
    let node = SyntaxTree::parse_one("int").unwrap();
    let mut ctx = GenContext::prefixed("encoder");
    let converter = CppOutputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.fn_name, "encoder1");
}

#[test]
fn test_cpp_scalar_input() {
    let node = SyntaxTree::parse_one("int[a]").unwrap();
    let mut ctx = GenContext::new();
    let converter = CppInputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.body, "return value.as_int();");
    assert_eq!(converter.arg_type, "jute::jValue");
    assert_eq!(converter.ret_type, "int");
    assert_eq!(converter.prop_name, "a");
}

#[test]
fn test_cpp_output_encodes_via_wire_value() {
    let node = SyntaxTree::parse_one("list(float)").unwrap();
    let mut ctx = GenContext::new();
    let converter = CppOutputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.arg_type, "vector<double>");
    assert_eq!(converter.ret_type, "jute::jValue");
    assert!(converter.body.contains("result.set_type(jute::JARRAY);"));
    assert!(converter.body.contains("converter1(value[i])"));
}

#[test]
fn test_map_unsupported_in_cpp_and_python() {
    let node = SyntaxTree::parse_one("map(string,int)").unwrap();
    for result in [
        CppInputConverter.render(&node, &mut GenContext::new()),
        CppOutputConverter.render(&node, &mut GenContext::new()),
        PythonInputConverter.render(&node, &mut GenContext::new()),
        PythonOutputConverter.render(&node, &mut GenContext::new()),
    ] {
        assert!(matches!(
            result.unwrap_err(),
            GenerateError::UnsupportedType { kind: TypeKind::Map, .. }
        ));
    }
}

#[test]
fn test_java_map_travels_as_flat_pairs() {
    let node = SyntaxTree::parse_one("map(string,int)").unwrap();

    let mut ctx = GenContext::new();
    let input = JavaInputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(input.ret_type, "Map<String, Integer>");
    assert!(input.body.contains("i += 2"));
    assert!(input.body.contains("converter1(value.get(i))"));
    assert!(input.body.contains("converter2(value.get(i + 1))"));

    let mut ctx = GenContext::new();
    let output = JavaOutputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(output.ret_type, "List");
    assert!(output.body.contains("entry.getKey()"));
    assert!(output.body.contains("entry.getValue()"));
}

#[test]
fn test_java_boxes_scalars_inside_containers() {
    let node = SyntaxTree::parse_one("list(int)").unwrap();
    let mut ctx = GenContext::new();
    let converter = JavaInputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.ret_type, "List<Integer>");

    let node = SyntaxTree::parse_one("array(int)").unwrap();
    let mut ctx = GenContext::new();
    let converter = JavaInputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.ret_type, "int[]");
}

#[test]
fn test_object_with_container_property() {
    let node = SyntaxTree::parse_one("object(list(int)[a],int[b])<Row>").unwrap();
    let (entries, all) = JavaInputConverter.converters_for(&[node]).unwrap();

    // int element, list, int property, then the object itself.
    assert_eq!(all.len(), 4);
    assert_eq!(all[1].ret_type, "List<Integer>");
    assert_eq!(entries[0].ret_type, "Row");
    assert!(entries[0].body.contains("result.a = converter2(value.get(0));"));
    assert!(entries[0].body.contains("result.b = converter3(value.get(1));"));
}

#[test]
fn test_python_bodies_are_tab_indented() {
    let node = SyntaxTree::parse_one("list(object(int[a],int[b])<Edge>)").unwrap();
    let (entries, all) = PythonInputConverter.converters_for(&[node]).unwrap();
    assert_eq!(entries[0].body, "\treturn [converter3(item) for item in value]");
    assert_eq!(all[2].body, "\treturn Edge(converter1(value[0]), converter2(value[1]))");
}

#[test]
fn test_python_object_output_is_positional() {
    let node = SyntaxTree::parse_one("object(int[a],string[s])<Row>").unwrap();
    let mut ctx = GenContext::new();
    let converter = PythonOutputConverter.render(&node, &mut ctx).unwrap();
    assert_eq!(converter.body, "\treturn [converter1(value.a), converter2(value.s)]");
}

#[test]
fn test_harness_marker_and_user_src_offset() {
    let suite = sum_suite();
    let solution = "def sum(a: int, b: int) -> int:\n\treturn a + b\n";
    let harness = test_harness(&suite, Language::Python, solution).unwrap();

    assert!(harness.source.contains(&format!("# {}", USER_SRC_MARKER)));
    assert_eq!(user_src_offset(&harness.source), Some(harness.user_src_line));
    assert!(harness.source.contains(solution));

    // Input and output converters coexist under disjoint name prefixes.
    assert!(harness.source.contains("def converter1(value):"));
    assert!(harness.source.contains("def encoder1(value):"));
    assert!(harness.source.contains("_args.append(converter1(_cols[0]))"));
    assert!(harness.source.contains("_args.append(converter2(_cols[1]))"));
    assert!(harness.source.contains("'result': encoder1(_result)"));
}

#[test]
fn test_cpp_harness_driver() {
    let suite = sum_suite();
    let template = solution_template(&suite, Language::Cpp).unwrap();
    let harness = test_harness(&suite, Language::Cpp, &template).unwrap();

    assert!(harness.source.contains("#include \"jute.h\""));
    assert!(harness.source.contains("vector<string> split_fields(const string &line)"));
    assert!(harness.source.contains("int main() {"));
    assert!(harness.source.contains("int result = solution.sum(arg0, arg1);"));
    assert!(harness.source.contains("record.add_property(\"duration\", ms);"));
}

#[test]
fn test_java_harness_wraps_scaffolding_in_runner_class() {
    let suite = sum_suite();
    let template = solution_template(&suite, Language::Java).unwrap();
    let harness = test_harness(&suite, Language::Java, &template).unwrap();

    assert!(harness.source.contains("public class Solution {"));
    assert!(harness.source.contains("class Runner {"));
    assert!(harness.source.contains("static ObjectMapper mapper = new ObjectMapper();"));
    assert!(harness.source.contains("int result = solution.sum(arg0, arg1);"));
    assert!(harness.source.contains("record.put(\"duration\", duration);"));
}

#[test]
fn test_harness_generation_fails_on_unsupported_result() {
    let suite = TestSuite::new("f", "d", &["int[a]", "map(string,int)"]).unwrap();
    let err = test_harness(&suite, Language::Python, "pass").unwrap_err();
    assert!(matches!(
        err,
        GenerateError::UnsupportedType { language: "Python", kind: TypeKind::Map }
    ));
}

#[test]
fn test_nested_matrix_converter_chain() {
    let suite = TestSuite::new("flatten_sum", "sum all matrix cells", &["array(array(int))[a]", "int"]).unwrap();
    let harness = test_harness(&suite, Language::Python, "def flatten_sum(a):\n\treturn sum(map(sum, a))\n").unwrap();

    // Inner converter first, outer applies it per row.
    assert!(harness.source.contains("def converter2(value):\n\treturn [converter1(item) for item in value]"));
    assert!(harness.source.contains("def converter3(value):\n\treturn [converter2(item) for item in value]"));
    assert!(harness.source.contains("_args.append(converter3(_cols[0]))"));
}

#[test]
fn test_edges_suite_generates_for_all_targets() {
    let cpp = edges_suite().with_user_type("Edge", "struct Edge {\n    int a;\n    int b;\n};");
    assert!(test_harness(&cpp, Language::Cpp, &solution_template(&cpp, Language::Cpp).unwrap()).is_ok());

    let java = edges_suite().with_user_type("Edge", "static class Edge {\n    Integer a;\n    Integer b;\n}");
    assert!(test_harness(&java, Language::Java, &solution_template(&java, Language::Java).unwrap()).is_ok());

    let python = edges_suite().with_user_type(
        "Edge",
        "class Edge:\n\tdef __init__(self, a, b):\n\t\tself.a = a\n\t\tself.b = b",
    );
    assert!(test_harness(&python, Language::Python, &solution_template(&python, Language::Python).unwrap()).is_ok());
}
