//! Locating a block of pattern lines inside a file's lines.
//!
//! The position finder slides the pattern over every offset and stops as soon as a
//! second match shows up, so a pass costs at most about `2 * n * m` line comparisons
//! (n file lines, m pattern lines). Repetitive files that keep nearly matching still
//! cost `O(n * m)` per pass, which is fine for source-sized inputs.

use crate::{ComparatorKind, DiagnosticLimits, DiagnosticReport};
use tracing::trace;

/// The resolved unique location of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
	/// 0-based index of the first matched file line.
	pub start_line: usize,
	pub pass_used: ComparatorKind,
}

/// Result of one full matching attempt.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
	Unique(MatchCandidate),
	/// 0-based start offsets of the matches seen before the scan stopped.
	Ambiguous(Vec<usize>),
	NotFound(DiagnosticReport),
}

/// Returns up to two 0-based offsets where every pattern line satisfies `comparator`.
pub fn find_positions(lines: &[String], pattern: &[String], comparator: ComparatorKind) -> Vec<usize> {
	let mut positions = Vec::new();

	if pattern.is_empty() || pattern.len() > lines.len() {
		return positions;
	}

	for offset in 0..=lines.len() - pattern.len() {
		if matches_at(lines, pattern, offset, comparator) {
			positions.push(offset);
			if positions.len() > 1 {
				trace!(comparator = %comparator, "second match at line {}, stopping scan", offset + 1);
				break;
			}
		}
	}

	positions
}

/// True when the whole pattern matches the file lines starting at `offset`.
pub fn matches_at(lines: &[String], pattern: &[String], offset: usize, comparator: ComparatorKind) -> bool {
	let Some(window) = offset.checked_add(pattern.len()).and_then(|end| lines.get(offset..end)) else {
		return false;
	};
	window.iter().zip(pattern).all(|(line, pat)| comparator.matches(line, pat))
}

/// Tries every comparator at a single offset, strictest first.
pub fn check_at(lines: &[String], pattern: &[String], offset: usize) -> Option<ComparatorKind> {
	if pattern.is_empty() {
		return None;
	}
	ComparatorKind::ALL
		.into_iter()
		.find(|kind| matches_at(lines, pattern, offset, *kind))
}

/// Runs the position finder through the comparators from strict to lenient.
///
/// Stops at the first pass with exactly one match (`Unique`) or with more than one
/// (`Ambiguous`). Loosening never resolves an ambiguity, so it is not attempted.
pub fn find_match(lines: &[String], pattern: &[String], limits: &DiagnosticLimits) -> MatchOutcome {
	for comparator in ComparatorKind::ALL {
		let positions = find_positions(lines, pattern, comparator);
		match positions.len() {
			0 => continue,
			1 => {
				return MatchOutcome::Unique(MatchCandidate {
					start_line: positions[0],
					pass_used: comparator,
				});
			}
			_ => return MatchOutcome::Ambiguous(positions),
		}
	}

	MatchOutcome::NotFound(DiagnosticReport::build(lines, pattern, limits))
}

// region:    --- Tests


// endregion: --- Tests
