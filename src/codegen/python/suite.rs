use super::input::PythonInputConverter;
use super::output::PythonOutputConverter;
use crate::codegen::{ConverterFn, ConverterGenerator, HarnessGenerator};
use crate::suite::TestSuite;
use itertools::Itertools;

const IMPORTS: &str = "import datetime\n\
                       import json\n\
                       import re\n\
                       import sys\n\
                       from typing import List";

/// Assembles the full runnable Python test harness.
pub struct PythonHarnessGenerator {
    input: PythonInputConverter,
    output: PythonOutputConverter,
}

impl PythonHarnessGenerator {
    pub fn new() -> Self {
        Self {
            input: PythonInputConverter,
            output: PythonOutputConverter,
        }
    }
}

impl Default for PythonHarnessGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessGenerator for PythonHarnessGenerator {
    fn line_comment(&self) -> &'static str {
        "#"
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
        format!("def {}(value):\n{}\n", converter.fn_name, converter.body)
    }

    fn driver(&self, suite: &TestSuite, inputs: &[ConverterFn], output: &ConverterFn) -> String {
        let mut out = String::new();
        out.push_str("def _fields(line):\n");
        out.push_str("\treturn [c.replace('\\\\;', ';') for c in re.split(r'(?<!\\\\);', line)]\n\n");
        out.push_str("for _line in sys.stdin:\n");
        out.push_str("\t_line = _line.strip()\n");
        out.push_str("\tif not _line:\n");
        out.push_str("\t\tcontinue\n");
        out.push_str("\t_cols = [json.loads(c) for c in _fields(_line)]\n");
        out.push_str("\t_args = []\n");
        for (slot, entry) in inputs.iter().enumerate() {
            out.push_str(&format!("\t_args.append({}(_cols[{}]))\n", entry.fn_name, slot));
        }
        let call_args = (0..inputs.len()).map(|slot| format!("_args[{}]", slot)).join(", ");
        out.push_str("\t_start = datetime.datetime.now()\n");
        out.push_str(&format!("\t_result = {}({})\n", suite.fn_name, call_args));
        out.push_str("\t_delta = datetime.datetime.now() - _start\n");
        out.push_str(
            "\t_duration = (_delta.days * 86400000) + (_delta.seconds * 1000) + (_delta.microseconds / 1000)\n",
        );
        out.push_str(&format!(
            "\tprint(json.dumps({{'expected': _cols[-1], 'result': {}(_result), 'args': _cols[:-1], 'duration': _duration}}), flush=True)\n",
            output.fn_name
        ));
        out
    }
}
