//! Helpers for integration tests (`test-support` feature).

use crate::{ApplyOptions, Result, apply_fuzzy_with, apply_strict_with};

/// Lenient apply that also returns the warnings, for assertions.
pub fn apply_fuzzy_warnings(original: &str, search: &str, replace: &str) -> Result<(String, Vec<String>)> {
	let outcome = apply_fuzzy_with(original, search, replace, &ApplyOptions::default())?;
	Ok((outcome.content, outcome.warnings))
}

/// Strict apply with a custom minimum context, so short fixtures can exercise it.
pub fn apply_strict_min(original: &str, search: &str, replace: &str, min_context_lines: usize) -> Result<String> {
	let options = ApplyOptions::default().with_min_context_lines(min_context_lines);
	apply_strict_with(original, search, replace, &options).map(|outcome| outcome.content)
}
