//! Scenario testing system for deterministic game testing
//!
//! Provides infrastructure for running scripted input tests against
//! headless simulation to verify game mechanics.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
pub use input::{ScriptedInputs, input_injection};
pub use parser::{
    BallDef, ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations,
    TestSetup,
};
pub use runner::{TestResult, initial_state, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// All `.toml` files under `base`, sorted. `filter` keeps paths containing it.
pub fn discover_tests(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_tests_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_tests_recursive(
    base: &Path,
    current: &Path,
    filter: Option<&str>,
    tests: &mut Vec<PathBuf>,
) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_tests_recursive(base, &path, filter, tests);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}

/// Parse and run one scenario file
pub fn run_test_file(path: &Path) -> TestResult {
    match parser::parse_test_file(path) {
        Ok(def) => run_test(&def),
        Err(message) => TestResult::Error { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_scenarios_pass() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
        let tests = discover_tests(&base, None);
        assert!(!tests.is_empty(), "no scenarios under {}", base.display());

        for path in tests {
            let result = run_test_file(&path);
            assert!(result.is_pass(), "{}: {:?}", path.display(), result);
        }
    }
}
