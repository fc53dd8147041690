use derive_more::Display;

/// Line equality predicates, from strictest to most lenient.
///
/// Declaration order is the cascade order. Every pair accepted by a variant is
/// also accepted by the ones declared after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ComparatorKind {
	#[display("exact")]
	Exact,
	#[display("trailing-whitespace-ignored")]
	TrailingWhitespace,
	#[display("edge-whitespace-ignored")]
	EdgeWhitespace,
	#[display("unicode-normalized")]
	UnicodeNormalized,
}

impl ComparatorKind {
	pub const ALL: [ComparatorKind; 4] = [
		ComparatorKind::Exact,
		ComparatorKind::TrailingWhitespace,
		ComparatorKind::EdgeWhitespace,
		ComparatorKind::UnicodeNormalized,
	];

	pub fn matches(self, file_line: &str, pattern_line: &str) -> bool {
		match self {
			ComparatorKind::Exact => file_line == pattern_line,
			ComparatorKind::TrailingWhitespace => file_line.trim_end() == pattern_line.trim_end(),
			ComparatorKind::EdgeWhitespace => file_line.trim() == pattern_line.trim(),
			ComparatorKind::UnicodeNormalized => {
				let (file_line, pattern_line) = (file_line.trim(), pattern_line.trim());
				file_line == pattern_line || normalize_unicode(file_line) == normalize_unicode(pattern_line)
			}
		}
	}

	pub fn is_exact(self) -> bool {
		self == ComparatorKind::Exact
	}
}

/// Edge-trims `line` and maps typographic punctuation and odd spaces to ASCII.
pub fn normalize_unicode(line: &str) -> String {
	line.trim()
		.chars()
		.map(|c| match c {
			'\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2212}' => '-',
			'\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
			'\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
			'\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2004}' | '\u{2005}' | '\u{2006}' | '\u{2007}' | '\u{2008}'
			| '\u{2009}' | '\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => ' ',
			other => other,
		})
		.collect()
}

// region:    --- Tests


// endregion: --- Tests
