//! Twist engine as a WASM module for browser environments.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { run, check } from 'twist-wasm';
//!
//! await init();
//!
//! const report = JSON.parse(run('NEWV\nINP "name?"\nOUT\n', "Ada"));
//! console.log(report.output); // ["name?", "Ada"]
//! ```

use twist_runner::{check as check_source, run_buffered};
use twist_vm::EngineConfig;
use wasm_bindgen::prelude::*;

/// Instruction budget for browser runs, so a looping program cannot hang
/// the page.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

const SOURCE_NAME: &str = "main.whl";

/// Run a Twist program.
///
/// `input` holds the lines `INP` will read, separated by `\n`. Returns a
/// JSON `RunReport`:
/// ```json
/// {
///   "success": true,
///   "exit": "end_of_stream",
///   "steps": 3,
///   "output": ["name?", "Ada"],
///   "diagnostic": null,
///   "error": null,
///   "errors": { "errors": [], "warnings": [], "total_errors": 0, "total_warnings": 0 },
///   "fingerprint": "…"
/// }
/// ```
#[wasm_bindgen]
pub fn run(source: &str, input: &str) -> String {
    let config = EngineConfig::with_step_limit(DEFAULT_STEP_LIMIT);
    let report = run_buffered(source, SOURCE_NAME, input.lines(), &config);
    serde_json::to_string(&report).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"exit":"host_error","steps":0,"diagnostic":null,"error":"Serialization error: {e}","errors":{{"errors":[],"warnings":[],"total_errors":0,"total_warnings":0}},"fingerprint":null}}"#
        )
    })
}

/// Load a Twist program without running it.
///
/// Returns a JSON `LoadErrors` object.
#[wasm_bindgen]
pub fn check(source: &str) -> String {
    let errors = check_source(source, SOURCE_NAME);
    serde_json::to_string(&errors).unwrap_or_else(|e| {
        format!(
            r#"{{"errors":[{{"message":"Serialization error: {e}"}}],"warnings":[],"total_errors":1,"total_warnings":0}}"#
        )
    })
}

/// Return the engine version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).expect("bridge returned invalid JSON")
    }

    #[test]
    fn test_run_with_input() {
        let report = parse(&run("NEWV\nINP \"name?\"\nOUT\n", "Ada\n"));
        assert_eq!(report["success"], true);
        assert_eq!(report["exit"], "end_of_stream");
        assert_eq!(report["output"], serde_json::json!(["name?", "Ada"]));
    }

    #[test]
    fn test_run_reports_faults() {
        let report = parse(&run("MOVVW 1\n", ""));
        assert_eq!(report["success"], false);
        assert_eq!(report["exit"], "fault");
        assert_eq!(report["diagnostic"]["kind"], "EMPTY_VWHEEL");
        assert_eq!(report["diagnostic"]["cursor"], 0);
    }

    #[test]
    fn test_infinite_loop_hits_the_budget() {
        let report = parse(&run("JMP 0\n", ""));
        assert_eq!(report["exit"], "step_limit");
        assert_eq!(report["steps"], DEFAULT_STEP_LIMIT);
    }

    #[test]
    fn test_check() {
        let ok = parse(&check("NEWV 1\n"));
        assert_eq!(ok["total_errors"], 0);

        let bad = parse(&check("newv 1\n"));
        assert_eq!(bad["total_errors"], 1);
        assert_eq!(bad["errors"][0]["code"], 200);
        assert_eq!(bad["errors"][0]["suggestion"], "Mnemonics are upper-case: NEWV");
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
