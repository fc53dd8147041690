/// One search/replace pair, as unpacked from a `<<<<<<< SEARCH` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBlock {
	pub search: String,
	pub replace: String,
}

impl EditBlock {
	pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
		Self {
			search: search.into(),
			replace: replace.into(),
		}
	}

	pub fn is_identical(&self) -> bool {
		self.search == self.replace
	}
}
