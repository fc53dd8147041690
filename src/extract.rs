use crate::{EditBlock, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_SEARCH_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<{7,}\s*SEARCH>?\s*$").unwrap());
static RE_DIVIDER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^={7,}\s*$").unwrap());
static RE_REPLACE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>{7,}\s*REPLACE\s*$").unwrap());

/// Extracts every `<<<<<<< SEARCH` / `=======` / `>>>>>>> REPLACE` block from `input`.
///
/// Markers must sit on their own line. Text outside the blocks is ignored (prose,
/// code fences). A content line that must look like a marker is written with a leading
/// `\`, which is removed here.
pub fn extract_edit_blocks(input: &str) -> Result<Vec<EditBlock>> {
	let mut blocks = Vec::new();
	let mut state = State::Outside;

	for (idx, line) in input.lines().enumerate() {
		let line_no = idx + 1;
		let marker = Marker::parse(line);

		state = match (state, marker) {
			(State::Outside, Some(Marker::Search)) => State::InSearch {
				start: line_no,
				search: Vec::new(),
			},
			(State::Outside, _) => State::Outside,

			(State::InSearch { start, search }, Some(Marker::Divider)) => State::InReplace {
				start,
				search,
				replace: Vec::new(),
			},
			(State::InSearch { .. }, Some(marker)) => {
				return Err(Error::invalid_envelope(
					line_no,
					format!("unexpected {} marker inside SEARCH section", marker.name()),
				));
			}
			(State::InSearch { start, mut search }, None) => {
				search.push(unescape_marker(line));
				State::InSearch { start, search }
			}

			(State::InReplace { search, replace, .. }, Some(Marker::Replace)) => {
				blocks.push(EditBlock::new(search.join("\n"), replace.join("\n")));
				State::Outside
			}
			(State::InReplace { .. }, Some(marker)) => {
				return Err(Error::invalid_envelope(
					line_no,
					format!("unexpected {} marker inside REPLACE section", marker.name()),
				));
			}
			(
				State::InReplace {
					start,
					search,
					mut replace,
				},
				None,
			) => {
				replace.push(unescape_marker(line));
				State::InReplace { start, search, replace }
			}
		};
	}

	match state {
		State::Outside => Ok(blocks),
		State::InSearch { start, .. } => Err(Error::invalid_envelope(
			start,
			"SEARCH section is never closed, missing ======= divider",
		)),
		State::InReplace { start, .. } => Err(Error::invalid_envelope(
			start,
			"REPLACE section is never closed, missing >>>>>>> REPLACE marker",
		)),
	}
}

// region:    --- Support

enum State {
	Outside,
	InSearch {
		start: usize,
		search: Vec<String>,
	},
	InReplace {
		start: usize,
		search: Vec<String>,
		replace: Vec<String>,
	},
}

#[derive(Debug, Clone, Copy)]
enum Marker {
	Search,
	Divider,
	Replace,
}

impl Marker {
	fn parse(line: &str) -> Option<Self> {
		let line = line.trim_end();
		if RE_SEARCH_MARKER.is_match(line) {
			Some(Marker::Search)
		} else if RE_DIVIDER_MARKER.is_match(line) {
			Some(Marker::Divider)
		} else if RE_REPLACE_MARKER.is_match(line) {
			Some(Marker::Replace)
		} else {
			None
		}
	}

	fn name(&self) -> &'static str {
		match self {
			Marker::Search => "<<<<<<< SEARCH",
			Marker::Divider => "=======",
			Marker::Replace => ">>>>>>> REPLACE",
		}
	}
}

/// `\=======` becomes `=======`, same for the other two markers.
fn unescape_marker(line: &str) -> String {
	match line.strip_prefix('\\') {
		Some(rest) if rest.starts_with("<<<<<<<") || rest.starts_with("=======") || rest.starts_with(">>>>>>>") => {
			rest.to_string()
		}
		_ => line.to_string(),
	}
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
