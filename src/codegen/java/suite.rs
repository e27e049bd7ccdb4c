use super::input::JavaInputConverter;
use super::output::JavaOutputConverter;
use crate::codegen::{ConverterFn, ConverterGenerator, HarnessGenerator};
use crate::suite::TestSuite;
use itertools::Itertools;

const IMPORTS: &str = "import java.util.*;\n\
                       import java.io.*;\n\
                       import com.fasterxml.jackson.databind.*;\n\
                       import com.fasterxml.jackson.databind.node.*;";

const SPLIT_FIELDS: &str = r#"    static List<String> splitFields(String line) {
        List<String> fields = new ArrayList<>();
        StringBuilder current = new StringBuilder();
        for (int i = 0; i < line.length(); i++) {
            char c = line.charAt(i);
            if (c == '\\' && i + 1 < line.length() && line.charAt(i + 1) == ';') {
                current.append(';');
                i++;
            } else if (c == ';') {
                fields.add(current.toString());
                current.setLength(0);
            } else {
                current.append(c);
            }
        }
        fields.add(current.toString());
        return fields;
    }"#;

/// Assembles the full runnable Java test harness. The user's `Solution`
/// class stays public; converters and the driving loop live in a
/// package-private `Runner` class in the same file.
pub struct JavaHarnessGenerator {
    input: JavaInputConverter,
    output: JavaOutputConverter,
}

impl JavaHarnessGenerator {
    pub fn new() -> Self {
        Self {
            input: JavaInputConverter,
            output: JavaOutputConverter,
        }
    }
}

impl Default for JavaHarnessGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessGenerator for JavaHarnessGenerator {
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
        let mut out = format!(
            "    static {} {}({} value) throws Exception {{\n",
            converter.ret_type, converter.fn_name, converter.arg_type
        );
        for line in converter.body.lines() {
            out.push_str("        ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("    }\n");
        out
    }

    fn driver(&self, suite: &TestSuite, inputs: &[ConverterFn], output: &ConverterFn) -> String {
        let mut out = String::from("    public static void main(String[] cmdline) throws Exception {\n");
        out.push_str("        Solution solution = new Solution();\n");
        out.push_str("        BufferedReader reader = new BufferedReader(new InputStreamReader(System.in));\n");
        out.push_str("        String line;\n");
        out.push_str("        while ((line = reader.readLine()) != null) {\n");
        out.push_str("            if (line.isEmpty()) { continue; }\n");
        out.push_str("            List<String> fields = splitFields(line);\n");
        for (slot, entry) in inputs.iter().enumerate() {
            out.push_str(&format!(
                "            {} arg{} = {}(mapper.readTree(fields.get({})));\n",
                entry.ret_type, slot, entry.fn_name, slot
            ));
        }
        let call_args = (0..inputs.len()).map(|slot| format!("arg{}", slot)).join(", ");
        out.push_str("            long started = System.currentTimeMillis();\n");
        out.push_str(&format!(
            "            {} result = solution.{}({});\n",
            output.arg_type, suite.fn_name, call_args
        ));
        out.push_str("            long duration = System.currentTimeMillis() - started;\n");
        out.push_str("            ObjectNode record = mapper.createObjectNode();\n");
        out.push_str(
            "            record.set(\"expected\", mapper.readTree(fields.get(fields.size() - 1)));\n",
        );
        out.push_str(&format!(
            "            record.set(\"result\", mapper.valueToTree({}(result)));\n",
            output.fn_name
        ));
        out.push_str("            ArrayNode args = mapper.createArrayNode();\n");
        out.push_str("            for (int f = 0; f + 1 < fields.size(); f++) {\n");
        out.push_str("                args.add(mapper.readTree(fields.get(f)));\n");
        out.push_str("            }\n");
        out.push_str("            record.set(\"args\", args);\n");
        out.push_str("            record.put(\"duration\", duration);\n");
        out.push_str("            System.out.println(mapper.writeValueAsString(record));\n");
        out.push_str("            System.out.flush();\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
        out
    }

    fn scaffolding(
        &self,
        suite: &TestSuite,
        converters: &[ConverterFn],
        inputs: &[ConverterFn],
        output: &ConverterFn,
    ) -> String {
        let mut out = String::from("class Runner {\n");
        out.push_str("    static ObjectMapper mapper = new ObjectMapper();\n\n");
        out.push_str(SPLIT_FIELDS);
        out.push_str("\n\n");
        for converter in converters {
            out.push_str(&self.converter_definition(converter));
            out.push('\n');
        }
        out.push_str(&self.driver(suite, inputs, output));
        out.push_str("}\n");
        out
    }
}
