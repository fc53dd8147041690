use crate::{AmbiguousReport, DiagnosticReport};
use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	// -- Edit block preconditions
	#[display("Search block is empty. Provide the exact lines to be replaced.")]
	EmptySearchBlock,

	#[display("Search and replace blocks are identical. The edit would not change anything.")]
	IdenticalBlocks,

	#[display("Search block has {lines} line(s) but must include at least {required} lines of context.")]
	InsufficientContext { lines: usize, required: usize },

	// -- Matching
	#[from]
	AmbiguousMatch(AmbiguousReport),

	#[from]
	NoMatchFound(DiagnosticReport),

	#[display(
		"Search block did not match exactly. The search text must be copied verbatim from the current file content, including whitespace."
	)]
	ExactMatchRequired,

	// -- Envelope
	#[display("Invalid search/replace block at line {line}: {reason}")]
	InvalidEnvelope { line: usize, reason: String },

	#[display("No <<<<<<< SEARCH / ======= / >>>>>>> REPLACE block found.")]
	NoEditBlocks,

	#[display("Edit block #{index} failed to apply.\n{cause}")]
	EditBlockFailed { index: usize, cause: Box<Error> },
}

// region:    --- Error Boilerplate

impl Error {
	pub fn invalid_envelope(line: usize, reason: impl Into<String>) -> Self {
		Self::InvalidEnvelope {
			line,
			reason: reason.into(),
		}
	}

	pub fn edit_block_failed(index: usize, cause: Error) -> Self {
		Self::EditBlockFailed {
			index,
			cause: Box::new(cause),
		}
	}

	/// Positions of an ambiguous match, also when wrapped in `EditBlockFailed`.
	pub fn ambiguous_positions(&self) -> Option<&[usize]> {
		match self {
			Error::AmbiguousMatch(report) => Some(&report.positions),
			Error::EditBlockFailed { cause, .. } => cause.ambiguous_positions(),
			_ => None,
		}
	}
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
