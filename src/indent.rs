use crate::source_text::is_blank;

/// Re-anchors replacement lines on the indentation found at the match.
///
/// `file_anchor` is the matched file line and `search_anchor` the search line that
/// matched it. Each replacement line keeps its indentation relative to
/// `search_anchor`, applied on top of the indentation of `file_anchor`. A line indented
/// less than the search anchor removes that many characters from the file indentation.
/// Blank replacement lines come out empty instead of receiving the file indentation
/// the rule above would give them, so no trailing whitespace is introduced.
pub fn reconcile_indentation(file_anchor: &str, search_anchor: &str, replace_lines: &[String]) -> Vec<String> {
	let base_indent = leading_whitespace(file_anchor);
	let search_indent_len = leading_whitespace(search_anchor).chars().count();

	replace_lines
		.iter()
		.map(|line| {
			if is_blank(line) {
				return String::new();
			}

			let indent = leading_whitespace(line);
			let indent_len = indent.chars().count();
			let content = line.trim_start();

			let new_indent: String = if indent_len >= search_indent_len {
				let extra: String = indent.chars().skip(search_indent_len).collect();
				format!("{base_indent}{extra}")
			} else {
				let remove = search_indent_len - indent_len;
				let base_len = base_indent.chars().count();
				base_indent.chars().take(base_len.saturating_sub(remove)).collect()
			};

			format!("{new_indent}{content}")
		})
		.collect()
}

fn leading_whitespace(s: &str) -> &str {
	s.find(|c: char| !c.is_whitespace()).map(|idx| &s[..idx]).unwrap_or(s)
}

// region:    --- Tests


// endregion: --- Tests
