use super::TestResult;
use std::path::{Path, PathBuf};

const SCENARIOS_DIR: &str = "tests/data/test-blocks";

/// One fixture folder: the file before, the edit blocks, and the file expected after.
pub struct Scenario {
	pub original: String,
	pub changes: String,
	pub expected: Option<String>,
}

pub fn load_scenario(folder: &str) -> TestResult<Scenario> {
	let dir = scenario_dir(folder);
	if !dir.is_dir() {
		return Err(format!("Scenario folder not found: {}", dir.to_string_lossy()).into());
	}

	let original = std::fs::read_to_string(dir.join("original.txt"))?;
	let changes = std::fs::read_to_string(dir.join("changes.txt"))?;
	let expected = read_optional(&dir.join("expected.txt"))?;

	Ok(Scenario {
		original,
		changes,
		expected,
	})
}

// region:    --- Support

fn scenario_dir(folder: &str) -> PathBuf {
	PathBuf::from(SCENARIOS_DIR).join(folder)
}

fn read_optional(path: &Path) -> TestResult<Option<String>> {
	if !path.exists() {
		return Ok(None);
	}
	Ok(Some(std::fs::read_to_string(path)?))
}

// endregion: --- Support
