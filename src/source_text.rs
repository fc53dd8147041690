/// Line ending style of a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
	Lf,
	CrLf,
}

impl LineEnding {
	/// `CrLf` as soon as the content holds a single `\r\n`, `Lf` otherwise.
	pub fn detect(content: &str) -> Self {
		if content.contains("\r\n") {
			LineEnding::CrLf
		} else {
			LineEnding::Lf
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			LineEnding::Lf => "\n",
			LineEnding::CrLf => "\r\n",
		}
	}
}

/// A file content split into lines, plus the line ending used to put it back together.
///
/// A trailing line ending is kept as a final empty line, so `parse` then `join`
/// is lossless for files that do not mix endings. Mixed files come back with
/// the detected ending only.
#[derive(Debug, Clone)]
pub struct SourceText {
	lines: Vec<String>,
	line_ending: LineEnding,
}

impl SourceText {
	pub fn parse(content: &str) -> Self {
		let line_ending = LineEnding::detect(content);
		let lines = content
			.split('\n')
			.map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
			.collect();

		Self { lines, line_ending }
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Lines a search block may match: all of them except the empty line standing for
	/// the final line ending, which only exists to be rejoined.
	pub fn searchable_lines(&self) -> &[String] {
		match self.lines.split_last() {
			Some((last, rest)) if last.is_empty() => rest,
			_ => &self.lines,
		}
	}

	pub fn line_ending(&self) -> LineEnding {
		self.line_ending
	}

	/// Replaces `len` lines starting at `start` with `replacement`.
	pub fn splice(&mut self, start: usize, len: usize, replacement: Vec<String>) {
		let end = (start + len).min(self.lines.len());
		self.lines.splice(start..end, replacement);
	}

	pub fn join(&self) -> String {
		self.lines.join(self.line_ending.as_str())
	}
}

/// Splits search or replace text into lines.
///
/// Same semantics as `str::lines`: a final line ending does not produce an extra
/// empty line, `\r` is stripped, and the empty string has no lines.
pub fn split_block_lines(content: &str) -> Vec<String> {
	content.lines().map(|l| l.to_string()).collect()
}

pub(crate) fn is_blank(line: &str) -> bool {
	line.trim().is_empty()
}

// region:    --- Tests


// endregion: --- Tests
