use once_cell::sync::Lazy;
use regex::Regex;

static RE_LINE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\| ?(.*)$").unwrap());

/// A `N| ` line-number annotation found on every line of a search block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberHint {
	/// 1-based line number of the first search line, as annotated.
	pub start_line: usize,
	pub stripped_search: String,
	/// Replace text with its prefixes removed, when at least one replace line carried one.
	pub stripped_replace: Option<String>,
}

impl LineNumberHint {
	/// 0-based file offset the hint points at.
	pub fn offset(&self) -> usize {
		self.start_line - 1
	}
}

/// Parses the `N| content` convention.
///
/// The search block must carry the prefix on every line, starting at 1 or more and
/// increasing by one per line. Anything else yields `None`. The replace block is only
/// looked at when the search block qualified: every replace line carrying a prefix is
/// stripped, blank and unnumbered lines (e.g. newly inserted ones) pass through as-is.
pub fn parse_line_number_hint(search: &str, replace: &str) -> Option<LineNumberHint> {
	let mut start_line = None;
	let mut stripped = Vec::new();

	for (idx, line) in search.lines().enumerate() {
		let (num, content) = split_prefix(line)?;
		let start = *start_line.get_or_insert(num);
		if start == 0 || num != start.checked_add(idx)? {
			return None;
		}
		stripped.push(content);
	}

	let start_line = start_line?;

	let mut any_prefixed = false;
	let replace_lines: Vec<&str> = replace
		.lines()
		.map(|line| match split_prefix(line) {
			Some((_, content)) => {
				any_prefixed = true;
				content
			}
			None => line,
		})
		.collect();
	let stripped_replace = any_prefixed.then(|| replace_lines.join("\n"));

	Some(LineNumberHint {
		start_line,
		stripped_search: stripped.join("\n"),
		stripped_replace,
	})
}

// region:    --- Support

fn split_prefix(line: &str) -> Option<(usize, &str)> {
	let caps = RE_LINE_PREFIX.captures(line)?;
	let num = caps.get(1)?.as_str().parse::<usize>().ok()?;
	let content = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
	Some((num, content))
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
