use super::input::CppInputConverter;
use super::output::CppOutputConverter;
use crate::codegen::{ConverterFn, ConverterGenerator, HarnessGenerator};
use crate::suite::TestSuite;
use itertools::Itertools;

const IMPORTS: &str = "#include <vector>\n\
                       #include <string>\n\
                       #include <iostream>\n\
                       #include <chrono>\n\
                       #include \"jute.h\"\n\
                       \n\
                       using namespace std;";

const SPLIT_FIELDS: &str = r#"vector<string> split_fields(const string &line) {
    vector<string> fields;
    string current;
    for (size_t i = 0; i < line.size(); i++) {
        if (line[i] == '\\' && i + 1 < line.size() && line[i + 1] == ';') {
            current.push_back(';');
            i++;
        } else if (line[i] == ';') {
            fields.push_back(current);
            current.clear();
        } else {
            current.push_back(line[i]);
        }
    }
    fields.push_back(current);
    return fields;
}"#;

/// Assembles the full runnable C++ test harness.
pub struct CppHarnessGenerator {
    input: CppInputConverter,
    output: CppOutputConverter,
}

impl CppHarnessGenerator {
    pub fn new() -> Self {
        Self {
            input: CppInputConverter,
            output: CppOutputConverter,
        }
    }
}

impl Default for CppHarnessGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessGenerator for CppHarnessGenerator {
    fn line_comment(&self) -> &'static str {
        "//"
    }

    fn imports(&self) -> &'static str {
        IMPORTS
    }

    fn input_generator(&self) -> &dyn ConverterGenerator {
        &self.input
    }

    fn output_generator(&self) -> &dyn ConverterGenerator {
        &self.output
    }

    fn converter_definition(&self, converter: &ConverterFn) -> String {
        format!(
            "{} {}({} value) {{\n{}\n}}\n",
            converter.ret_type, converter.fn_name, converter.arg_type, converter.body
        )
    }

    fn driver(&self, suite: &TestSuite, inputs: &[ConverterFn], output: &ConverterFn) -> String {
        let mut out = String::from(SPLIT_FIELDS);
        out.push_str("\n\nint main() {\n");
        out.push_str("    Solution solution;\n");
        out.push_str("    string line;\n");
        out.push_str("    while (getline(cin, line)) {\n");
        out.push_str("        if (line.empty()) { continue; }\n");
        out.push_str("        vector<string> fields = split_fields(line);\n");
        for (slot, entry) in inputs.iter().enumerate() {
            out.push_str(&format!(
                "        {} arg{} = {}(jute::parser::parse(fields[{}]));\n",
                entry.ret_type, slot, entry.fn_name, slot
            ));
        }
        let call_args = (0..inputs.len()).map(|slot| format!("arg{}", slot)).join(", ");
        out.push_str("        auto started = chrono::steady_clock::now();\n");
        out.push_str(&format!(
            "        {} result = solution.{}({});\n",
            output.arg_type, suite.fn_name, call_args
        ));
        out.push_str("        auto finished = chrono::steady_clock::now();\n");
        out.push_str(
            "        long duration = chrono::duration_cast<chrono::milliseconds>(finished - started).count();\n",
        );
        out.push_str("        jute::jValue record;\n");
        out.push_str("        record.set_type(jute::JOBJECT);\n");
        out.push_str(
            "        record.add_property(\"expected\", jute::parser::parse(fields[fields.size() - 1]));\n",
        );
        out.push_str(&format!(
            "        record.add_property(\"result\", {}(result));\n",
            output.fn_name
        ));
        out.push_str("        jute::jValue args;\n");
        out.push_str("        args.set_type(jute::JARRAY);\n");
        out.push_str("        for (size_t f = 0; f + 1 < fields.size(); f++) {\n");
        out.push_str("            args.add_element(jute::parser::parse(fields[f]));\n");
        out.push_str("        }\n");
        out.push_str("        record.add_property(\"args\", args);\n");
        out.push_str("        jute::jValue ms;\n");
        out.push_str("        ms.set_type(jute::JNUMBER);\n");
        out.push_str("        ms.set_string(std::to_string(duration));\n");
        out.push_str("        record.add_property(\"duration\", ms);\n");
        out.push_str("        cout << record.to_string() << endl;\n");
        out.push_str("    }\n");
        out.push_str("    return 0;\n");
        out.push_str("}\n");
        out
    }
}
