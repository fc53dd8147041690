// region:    --- Modules

mod applier;
mod comparator;
mod diagnostics;
mod edit_block;
mod error;
mod extract;
mod indent;
mod line_hint;
mod seek;
mod source_text;

pub use applier::*;
pub use comparator::*;
pub use diagnostics::*;
pub use edit_block::*;
pub use error::*;
pub use extract::*;
pub use indent::reconcile_indentation;
pub use line_hint::*;
pub use seek::*;
pub use source_text::{LineEnding, SourceText, split_block_lines};

#[cfg(feature = "test-support")]
pub mod for_test;

// endregion: --- Modules
