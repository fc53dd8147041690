use crate::source_text::{is_blank, split_block_lines};
use crate::{
	AmbiguousReport, ComparatorKind, DiagnosticLimits, DiagnosticReport, Error, MatchCandidate, MatchOutcome, Result,
	SourceText, check_at, extract_edit_blocks, find_match, find_positions, parse_line_number_hint,
	reconcile_indentation,
};
use derive_more::Display;
use tracing::{debug, warn};

// region:    --- Types

/// Knobs for the apply pipeline. `Default` is what `apply_fuzzy` / `apply_strict` use.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
	/// Minimum search block length accepted by the strict apply.
	pub min_context_lines: usize,
	/// Recognize `N| ` line-number prefixes in the lenient apply.
	pub line_number_hints: bool,
	/// Retry without leading/trailing blank search lines when nothing matched.
	pub trim_blank_edges: bool,
	pub diagnostics: DiagnosticLimits,
}

impl Default for ApplyOptions {
	fn default() -> Self {
		Self {
			min_context_lines: 3,
			line_number_hints: true,
			trim_blank_edges: true,
			diagnostics: DiagnosticLimits::default(),
		}
	}
}

impl ApplyOptions {
	pub fn with_min_context_lines(mut self, min_context_lines: usize) -> Self {
		self.min_context_lines = min_context_lines;
		self
	}

	pub fn with_line_number_hints(mut self, enabled: bool) -> Self {
		self.line_number_hints = enabled;
		self
	}

	pub fn with_trim_blank_edges(mut self, enabled: bool) -> Self {
		self.trim_blank_edges = enabled;
		self
	}

	pub fn with_diagnostics(mut self, diagnostics: DiagnosticLimits) -> Self {
		self.diagnostics = diagnostics;
		self
	}
}

/// Which step of the pipeline located the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MatchStrategy {
	#[display("line-number hint")]
	LineNumberHint,
	#[display("cascade")]
	Cascade,
	#[display("blank edges trimmed")]
	TrimmedBlankEdges,
	#[display("line-number prefixes kept as content")]
	UnstrippedLineNumbers,
	#[display("exact only")]
	ExactOnly,
}

#[derive(Debug, Clone)]
pub struct PatchOutcome {
	pub content: String,
	pub candidate: MatchCandidate,
	pub strategy: MatchStrategy,
	/// Non-fatal notes, e.g. identical blocks or a lenient comparator being needed.
	pub warnings: Vec<String>,
}

// endregion: --- Types

// region:    --- Public Apply

/// Applies one search/replace edit with the lenient multi-pass pipeline.
pub fn apply_fuzzy(original: &str, search: &str, replace: &str) -> Result<String> {
	apply_fuzzy_with(original, search, replace, &ApplyOptions::default()).map(|outcome| outcome.content)
}

/// Applies one search/replace edit that must match verbatim, exactly once.
pub fn apply_strict(original: &str, search: &str, replace: &str) -> Result<String> {
	apply_strict_with(original, search, replace, &ApplyOptions::default()).map(|outcome| outcome.content)
}

/// Lenient apply.
///
/// Order of attempts: direct check at the line-number hint, full comparator cascade,
/// cascade without leading/trailing blank search lines, and finally the whole thing
/// again with the `N| ` prefixes kept as content. Each step runs only after the
/// previous one found nothing. An ambiguous match ends the pipeline right away.
pub fn apply_fuzzy_with(original: &str, search: &str, replace: &str, options: &ApplyOptions) -> Result<PatchOutcome> {
	let raw_search = split_block_lines(search);
	if raw_search.iter().all(|l| is_blank(l)) {
		return Err(Error::EmptySearchBlock);
	}

	let mut warnings = Vec::new();
	if search == replace {
		warn!("search and replace blocks are identical, applying anyway");
		warnings.push(Error::IdenticalBlocks.to_string());
	}

	let source = SourceText::parse(original);
	let lines = source.searchable_lines();

	// A hint that strips down to nothing leaves the raw text as the only candidate.
	let hint = if options.line_number_hints {
		parse_line_number_hint(search, replace)
			.filter(|hint| !split_block_lines(&hint.stripped_search).iter().all(|l| is_blank(l)))
	} else {
		None
	};

	let resolved = match &hint {
		Some(hint) => {
			let search_lines = split_block_lines(&hint.stripped_search);
			let replace_lines = split_block_lines(hint.stripped_replace.as_deref().unwrap_or(replace));
			match locate(lines, search_lines, replace_lines, Some(hint.offset()), options)? {
				Located::Found(resolved) => resolved,
				Located::Missed(report) => {
					debug!(start_line = hint.start_line, "no match with line-number prefixes stripped, retrying with raw text");
					match locate(lines, raw_search, split_block_lines(replace), None, options)? {
						Located::Found(mut resolved) => {
							resolved.strategy = MatchStrategy::UnstrippedLineNumbers;
							resolved
						}
						Located::Missed(_) => return Err(Error::NoMatchFound(report)),
					}
				}
			}
		}
		None => match locate(lines, raw_search, split_block_lines(replace), None, options)? {
			Located::Found(resolved) => resolved,
			Located::Missed(report) => return Err(Error::NoMatchFound(report)),
		},
	};

	let candidate = resolved.candidate;
	debug!(
		start_line = candidate.start_line + 1,
		pass = %candidate.pass_used,
		strategy = %resolved.strategy,
		"search block located"
	);
	if !candidate.pass_used.is_exact() {
		warn!(pass = %candidate.pass_used, "search block matched only with a lenient comparator");
		warnings.push(format!(
			"Search block matched at line {} with the {} comparator, not exactly.",
			candidate.start_line + 1,
			candidate.pass_used
		));
	}

	let strategy = resolved.strategy;
	let content = splice(source, resolved);

	Ok(PatchOutcome {
		content,
		candidate,
		strategy,
		warnings,
	})
}

/// Strict apply: exact comparator only, no hints, no fallbacks.
///
/// An ambiguous block is reported before the minimum context check since the
/// ambiguity report already asks for more context and names the locations.
pub fn apply_strict_with(original: &str, search: &str, replace: &str, options: &ApplyOptions) -> Result<PatchOutcome> {
	if search == replace {
		return Err(Error::IdenticalBlocks);
	}

	let search_lines = split_block_lines(search);
	if search_lines.iter().all(|l| is_blank(l)) {
		return Err(Error::EmptySearchBlock);
	}

	let source = SourceText::parse(original);
	let positions = find_positions(source.searchable_lines(), &search_lines, ComparatorKind::Exact);

	if positions.len() > 1 {
		return Err(ambiguous(positions, search_lines.len()));
	}

	if search_lines.len() < options.min_context_lines {
		return Err(Error::InsufficientContext {
			lines: search_lines.len(),
			required: options.min_context_lines,
		});
	}

	let Some(start_line) = positions.first().copied() else {
		return Err(Error::ExactMatchRequired);
	};

	let candidate = MatchCandidate {
		start_line,
		pass_used: ComparatorKind::Exact,
	};
	debug!(start_line = start_line + 1, "search block located (strict)");

	let resolved = Resolved {
		candidate,
		strategy: MatchStrategy::ExactOnly,
		search_lines,
		replace_lines: split_block_lines(replace),
	};
	let content = splice(source, resolved);

	Ok(PatchOutcome {
		content,
		candidate,
		strategy: MatchStrategy::ExactOnly,
		warnings: Vec::new(),
	})
}

/// Extracts every `SEARCH/REPLACE` envelope from `input` and applies them in order,
/// each one on the result of the previous. The first failing block aborts the whole run.
pub fn apply_edit_blocks(original: &str, input: &str, options: &ApplyOptions) -> Result<String> {
	let blocks = extract_edit_blocks(input)?;
	if blocks.is_empty() {
		return Err(Error::NoEditBlocks);
	}

	let mut content = original.to_string();
	for (idx, block) in blocks.iter().enumerate() {
		let outcome = apply_fuzzy_with(&content, &block.search, &block.replace, options)
			.map_err(|err| Error::edit_block_failed(idx + 1, err))?;
		debug!(block = idx + 1, strategy = %outcome.strategy, "edit block applied");
		content = outcome.content;
	}

	Ok(content)
}

// endregion: --- Public Apply

// region:    --- Support

struct Resolved {
	candidate: MatchCandidate,
	strategy: MatchStrategy,
	search_lines: Vec<String>,
	replace_lines: Vec<String>,
}

enum Located {
	Found(Resolved),
	Missed(DiagnosticReport),
}

/// Hint check, full cascade, then the blank-edge retry.
fn locate(
	lines: &[String],
	search_lines: Vec<String>,
	replace_lines: Vec<String>,
	hint_offset: Option<usize>,
	options: &ApplyOptions,
) -> Result<Located> {
	// -- Direct hit at the hinted line
	if let Some(offset) = hint_offset
		&& let Some(pass_used) = check_at(lines, &search_lines, offset)
	{
		return Ok(Located::Found(Resolved {
			candidate: MatchCandidate {
				start_line: offset,
				pass_used,
			},
			strategy: MatchStrategy::LineNumberHint,
			search_lines,
			replace_lines,
		}));
	}

	// -- Whole-file cascade
	let report = match find_match(lines, &search_lines, &options.diagnostics) {
		MatchOutcome::Unique(candidate) => {
			return Ok(Located::Found(Resolved {
				candidate,
				strategy: MatchStrategy::Cascade,
				search_lines,
				replace_lines,
			}));
		}
		MatchOutcome::Ambiguous(positions) => return Err(ambiguous(positions, search_lines.len())),
		MatchOutcome::NotFound(report) => report,
	};

	// -- Retry without blank edges
	if options.trim_blank_edges
		&& let Some((lead, trail)) = blank_edges(&search_lines)
	{
		let trimmed_search = search_lines[lead..search_lines.len() - trail].to_vec();
		match find_match(lines, &trimmed_search, &options.diagnostics) {
			MatchOutcome::Unique(candidate) => {
				return Ok(Located::Found(Resolved {
					candidate,
					strategy: MatchStrategy::TrimmedBlankEdges,
					search_lines: trimmed_search,
					replace_lines: trim_edges(replace_lines, lead, trail),
				}));
			}
			MatchOutcome::Ambiguous(positions) => return Err(ambiguous(positions, trimmed_search.len())),
			MatchOutcome::NotFound(_) => (),
		}
	}

	Ok(Located::Missed(report))
}

/// Count of leading and trailing blank lines, `None` when there is nothing to trim
/// or nothing would be left.
fn blank_edges(lines: &[String]) -> Option<(usize, usize)> {
	let lead = lines.iter().take_while(|l| is_blank(l)).count();
	if lead == lines.len() {
		return None;
	}
	let trail = lines.iter().rev().take_while(|l| is_blank(l)).count();
	(lead + trail > 0).then_some((lead, trail))
}

/// Drops up to `lead` leading and `trail` trailing blank lines.
fn trim_edges(mut lines: Vec<String>, lead: usize, trail: usize) -> Vec<String> {
	let trail = lines.iter().rev().take(trail).take_while(|l| is_blank(l)).count();
	lines.truncate(lines.len() - trail);
	let lead = lines.iter().take(lead).take_while(|l| is_blank(l)).count();
	lines.drain(..lead);
	lines
}

fn ambiguous(positions: Vec<usize>, search_line_count: usize) -> Error {
	warn!(?positions, "search block is ambiguous");
	Error::AmbiguousMatch(AmbiguousReport {
		positions,
		search_line_count,
	})
}

/// Swaps the matched region for the re-indented replacement and rejoins the file.
fn splice(mut source: SourceText, resolved: Resolved) -> String {
	let Resolved {
		candidate,
		search_lines,
		replace_lines,
		..
	} = resolved;
	let start = candidate.start_line;

	let anchor = search_lines.iter().position(|l| !is_blank(l)).unwrap_or(0);
	let file_anchor = source.lines().get(start + anchor).map(String::as_str).unwrap_or_default();
	let search_anchor = search_lines.get(anchor).map(String::as_str).unwrap_or_default();

	let new_lines = reconcile_indentation(file_anchor, search_anchor, &replace_lines);
	source.splice(start, search_lines.len(), new_lines);
	source.join()
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_applier_fuzzy_simple() -> Result<()> {
		// -- Exec
		let content = apply_fuzzy("a\nb\nc\nd\n", "b\nc", "X\nY")?;

		// -- Check
		assert_eq!(content, "a\nX\nY\nd\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_line_hint_direct() -> Result<()> {
		// -- Setup & Fixtures
		// The same two lines exist twice; the hint points at the second one.
		let original = "x = 1\ny = 2\n---\nx = 1\ny = 2\n";
		let search = "4| x = 1\n5| y = 2";
		let replace = "4| x = 10\n5| y = 20";

		// -- Exec
		let outcome = apply_fuzzy_with(original, search, replace, &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::LineNumberHint);
		assert_eq!(outcome.candidate.start_line, 3);
		assert_eq!(outcome.content, "x = 1\ny = 2\n---\nx = 10\ny = 20\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_line_hint_wrong_line_falls_back() -> Result<()> {
		// -- Setup & Fixtures
		let original = "a\nb\nc\n";
		let search = "7| b";
		let replace = "7| B";

		// -- Exec
		let outcome = apply_fuzzy_with(original, search, replace, &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::Cascade);
		assert_eq!(outcome.content, "a\nB\nc\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_numbered_list_is_content() -> Result<()> {
		// -- Setup & Fixtures
		let original = "# Steps\n1| install\n2| run\n";
		let search = "1| install\n2| run";
		let replace = "1| install\n2| build\n3| run";

		// -- Exec
		let outcome = apply_fuzzy_with(original, search, replace, &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::UnstrippedLineNumbers);
		assert_eq!(outcome.content, "# Steps\n1| install\n2| build\n3| run\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_line_hint_replace_with_blank_line() -> Result<()> {
		// -- Exec
		let outcome = apply_fuzzy_with("a\nb\nc\nd\n", "2| b\n3| c", "2| b\n\n3| C", &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::LineNumberHint);
		assert_eq!(outcome.content, "a\nb\n\nC\nd\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_line_hint_replace_with_inserted_line() -> Result<()> {
		// -- Exec
		let outcome = apply_fuzzy_with(
			"a\nb\nc\nd\n",
			"2| b\n3| c",
			"2| b\n    inserted\n3| C",
			&ApplyOptions::default(),
		)?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::LineNumberHint);
		assert_eq!(outcome.content, "a\nb\n    inserted\nC\nd\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_blank_line_hint_uses_raw_text() -> Result<()> {
		// -- Exec
		let outcome = apply_fuzzy_with("x\n1|\ny\n", "1|", "1| z", &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::Cascade);
		assert_eq!(outcome.content, "x\n1| z\ny\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_blank_line_hint_not_found_has_partial_match() -> Result<()> {
		// -- Exec
		let res = apply_fuzzy("a\n", "1|", "x");

		// -- Check
		let Err(Error::NoMatchFound(report)) = res else {
			return Err(format!("Expected NoMatchFound, got {res:?}").into());
		};
		assert!(report.best_match.is_some());
		assert_eq!(report.first_mismatch(), Some(0));

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_blank_search_end_keeps_final_newline() -> Result<()> {
		// -- Exec
		let outcome = apply_fuzzy_with("a\nb\n", "b\n\n", "B", &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::TrimmedBlankEdges);
		assert_eq!(outcome.content, "a\nB\n");

		Ok(())
	}

	#[test]
	fn test_applier_strict_final_newline_not_matchable() -> Result<()> {
		// -- Exec
		let res = apply_strict("a\nb\nc\n", "b\nc\n\n", "B\nC");

		// -- Check
		assert!(matches!(res, Err(Error::ExactMatchRequired)), "got {res:?}");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_trimmed_blank_edges() -> Result<()> {
		// -- Setup & Fixtures
		let original = "a\nb\nc\n";
		let search = "\nb\n\n";
		let replace = "\nB\n\n";

		// -- Exec
		let outcome = apply_fuzzy_with(original, search, replace, &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.strategy, MatchStrategy::TrimmedBlankEdges);
		assert_eq!(outcome.content, "a\nB\nc\n");

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_trim_disabled() -> Result<()> {
		// -- Setup & Fixtures
		let options = ApplyOptions::default().with_trim_blank_edges(false);

		// -- Exec
		let res = apply_fuzzy_with("a\nb\nc\n", "\nb\n\n", "B", &options);

		// -- Check
		assert!(matches!(res, Err(Error::NoMatchFound(_))));

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_identical_warns() -> Result<()> {
		// -- Exec
		let outcome = apply_fuzzy_with("a\nb\n", "b", "b", &ApplyOptions::default())?;

		// -- Check
		assert_eq!(outcome.content, "a\nb\n");
		assert_eq!(outcome.warnings.len(), 1);

		Ok(())
	}

	#[test]
	fn test_applier_fuzzy_empty_search() -> Result<()> {
		// -- Exec & Check
		assert!(matches!(apply_fuzzy("a\n", "", "x"), Err(Error::EmptySearchBlock)));
		assert!(matches!(apply_fuzzy("a\n\n", "\n  \n", "x"), Err(Error::EmptySearchBlock)));

		Ok(())
	}

	#[test]
	fn test_applier_strict_insufficient_context() -> Result<()> {
		// -- Exec
		let res = apply_strict("one line only\n", "one line only", "two");

		// -- Check
		assert!(matches!(res, Err(Error::InsufficientContext { lines: 1, required: 3 })));

		Ok(())
	}

	#[test]
	fn test_applier_strict_min_context_option() -> Result<()> {
		// -- Setup & Fixtures
		let options = ApplyOptions::default().with_min_context_lines(1);

		// -- Exec
		let outcome = apply_strict_with("a\nb\n", "b", "c", &options)?;

		// -- Check
		assert_eq!(outcome.content, "a\nc\n");
		assert_eq!(outcome.strategy, MatchStrategy::ExactOnly);

		Ok(())
	}

	#[test]
	fn test_applier_blank_edges_helpers() -> Result<()> {
		// -- Setup & Fixtures
		let lines: Vec<String> = ["", "a", "", ""].iter().map(|s| s.to_string()).collect();

		// -- Exec & Check
		assert_eq!(blank_edges(&lines), Some((1, 2)));
		assert_eq!(trim_edges(lines.clone(), 1, 2), vec!["a"]);
		assert_eq!(trim_edges(vec!["x".to_string(), "".to_string()], 1, 2), vec!["x"]);
		assert_eq!(blank_edges(&["a".to_string()]), None);

		Ok(())
	}
}

// endregion: --- Tests
