//! Structured failure reports for unmatched and ambiguous search blocks.
//!
//! The reports are plain data. Their `Display` output is the text handed back to the
//! caller (usually an agent), so it has to be enough to correct the search block.

use crate::ComparatorKind;
use std::fmt;

/// Caps on how much of a large search block ends up in a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLimits {
	/// Blocks up to this many lines are shown in full.
	pub max_lines: usize,
	pub head_lines: usize,
	pub tail_lines: usize,
}

impl Default for DiagnosticLimits {
	fn default() -> Self {
		Self {
			max_lines: 20,
			head_lines: 10,
			tail_lines: 5,
		}
	}
}

impl DiagnosticLimits {
	pub fn with_max_lines(mut self, max_lines: usize) -> Self {
		self.max_lines = max_lines;
		self
	}

	pub fn with_head_tail(mut self, head_lines: usize, tail_lines: usize) -> Self {
		self.head_lines = head_lines;
		self.tail_lines = tail_lines;
		self
	}
}

/// Head and tail of a list of lines, with the count of what was left out in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elided<T> {
	pub head: Vec<T>,
	pub omitted: usize,
	pub tail: Vec<T>,
}

impl<T: Clone> Elided<T> {
	pub fn new(items: &[T], limits: &DiagnosticLimits) -> Self {
		let keep = limits.head_lines + limits.tail_lines;
		if items.len() <= limits.max_lines.max(keep) {
			return Self {
				head: items.to_vec(),
				omitted: 0,
				tail: Vec::new(),
			};
		}

		let tail_start = items.len() - limits.tail_lines;
		Self {
			head: items[..limits.head_lines].to_vec(),
			omitted: tail_start - limits.head_lines,
			tail: items[tail_start..].to_vec(),
		}
	}
}

// region:    --- DiagnosticReport

/// The file offset that most resembles the search block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPartialMatch {
	/// 0-based index of the first file line of the window.
	pub start_line: usize,
	/// One flag per search line, true when it matched the file line under it.
	pub line_flags: Vec<bool>,
	pub first_mismatch: usize,
	/// `(search line, file line)` at `first_mismatch`.
	pub mismatch: (String, String),
	/// The file lines under the search block, paired with their flags.
	pub window: Elided<(bool, String)>,
}

impl BestPartialMatch {
	pub fn matched_count(&self) -> usize {
		self.line_flags.iter().filter(|f| **f).count()
	}

	/// 1-based inclusive line range of the window in the file.
	pub fn line_range(&self) -> (usize, usize) {
		(self.start_line + 1, self.start_line + self.line_flags.len())
	}
}

/// Why a search block matched nowhere, and where it came closest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
	pub search_line_count: usize,
	pub search_lines: Elided<String>,
	/// `None` when the search block is longer than the file.
	pub best_match: Option<BestPartialMatch>,
}

impl DiagnosticReport {
	pub fn build(lines: &[String], pattern: &[String], limits: &DiagnosticLimits) -> Self {
		Self {
			search_line_count: pattern.len(),
			search_lines: Elided::new(pattern, limits),
			best_match: best_partial_match(lines, pattern, limits),
		}
	}

	pub fn first_mismatch(&self) -> Option<usize> {
		self.best_match.as_ref().map(|m| m.first_mismatch)
	}
}

/// Scores every offset by how many search lines match the file line under them
/// (unicode-normalized comparison) and keeps the first offset with the best score.
pub fn best_partial_match(lines: &[String], pattern: &[String], limits: &DiagnosticLimits) -> Option<BestPartialMatch> {
	if pattern.is_empty() || pattern.len() > lines.len() {
		return None;
	}

	let mut best: Option<(usize, Vec<bool>, usize)> = None;
	for offset in 0..=lines.len() - pattern.len() {
		let flags: Vec<bool> = lines[offset..offset + pattern.len()]
			.iter()
			.zip(pattern)
			.map(|(line, pat)| ComparatorKind::UnicodeNormalized.matches(line, pat))
			.collect();
		let count = flags.iter().filter(|f| **f).count();

		if best.as_ref().is_none_or(|(_, _, best_count)| count > *best_count) {
			best = Some((offset, flags, count));
		}
	}

	let (start_line, line_flags, _) = best?;
	// A full match would have been found by the cascade, so a mismatch exists.
	let first_mismatch = line_flags.iter().position(|f| !f)?;

	let window: Vec<(bool, String)> = line_flags
		.iter()
		.zip(&lines[start_line..start_line + pattern.len()])
		.map(|(flag, line)| (*flag, line.clone()))
		.collect();

	Some(BestPartialMatch {
		start_line,
		mismatch: (
			pattern[first_mismatch].clone(),
			lines[start_line + first_mismatch].clone(),
		),
		window: Elided::new(&window, limits),
		first_mismatch,
		line_flags,
	})
}

impl fmt::Display for DiagnosticReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Search block did not match any content in the file.")?;
		writeln!(f)?;

		writeln!(f, "Search block ({} lines):", self.search_line_count)?;
		write_elided(f, &self.search_lines, |f, line| writeln!(f, "  {line}"))?;
		writeln!(f)?;

		match &self.best_match {
			Some(best) => {
				let (from, to) = best.line_range();
				writeln!(
					f,
					"Best partial match at lines {from}-{to} ({} of {} lines matched):",
					best.matched_count(),
					best.line_flags.len()
				)?;

				// Line numbers are recomputed from the window position, elision included.
				let mut line_no = best.start_line + 1;
				for (flag, line) in &best.window.head {
					writeln!(f, "  {line_no:>5} {} {line}", marker(*flag))?;
					line_no += 1;
				}
				if best.window.omitted > 0 {
					writeln!(f, "  ... ({} lines omitted) ...", best.window.omitted)?;
					line_no += best.window.omitted;
				}
				for (flag, line) in &best.window.tail {
					writeln!(f, "  {line_no:>5} {} {line}", marker(*flag))?;
					line_no += 1;
				}
				writeln!(f)?;

				let (expected, found) = &best.mismatch;
				writeln!(
					f,
					"First mismatch at search line {} (file line {}):",
					best.first_mismatch + 1,
					best.start_line + best.first_mismatch + 1
				)?;
				writeln!(f, "  search: {expected:?}")?;
				writeln!(f, "  file:   {found:?}")?;
			}
			None => {
				writeln!(f, "The search block has more lines than the file, no partial match to show.")?;
			}
		}

		writeln!(f)?;
		write!(
			f,
			"Suggestion: copy the search lines from the current file content exactly (whitespace, punctuation, and line order), and re-read the file if it may have changed."
		)
	}
}

// endregion: --- DiagnosticReport

// region:    --- AmbiguousReport

/// Every location a search block matched under the same comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousReport {
	/// 0-based start offsets.
	pub positions: Vec<usize>,
	pub search_line_count: usize,
}

impl fmt::Display for AmbiguousReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let ranges: Vec<String> = self
			.positions
			.iter()
			.map(|p| format!("{}-{}", p + 1, p + self.search_line_count))
			.collect();
		writeln!(
			f,
			"Search block is ambiguous: it matched at least {} locations (lines {}).",
			self.positions.len(),
			ranges.join(", ")
		)?;
		write!(
			f,
			"Suggestion: add 3-5 more lines of surrounding context to the search block so it matches exactly one location."
		)
	}
}

// endregion: --- AmbiguousReport

// region:    --- Support

fn marker(matched: bool) -> &'static str {
	if matched { "[MATCHED] " } else { "[MISMATCH]" }
}

fn write_elided<T>(
	f: &mut fmt::Formatter<'_>,
	elided: &Elided<T>,
	write_item: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
	for item in &elided.head {
		write_item(f, item)?;
	}
	if elided.omitted > 0 {
		writeln!(f, "  ... ({} lines omitted) ...", elided.omitted)?;
	}
	for item in &elided.tail {
		write_item(f, item)?;
	}
	Ok(())
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
