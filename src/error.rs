use core::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Which input of a reconciliation a [`DuplicateKeyError`] was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sequence {
	/// The blocks that were current before the update.
	Old,
	/// The items the update was requested for.
	New,
}
impl Display for Sequence {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Sequence::Old => "old blocks",
			Sequence::New => "new items",
		})
	}
}

/// Two entries of the same sequence share a key.
///
/// This is always a caller error. It's detected before any [`Renderer`](`crate::Renderer`) callback runs,
/// so the blocks passed in are left as they were.
///
/// Only positions are reported, as keys may contain application data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("duplicate key in {sequence} at indices {first} and {second}")]
pub struct DuplicateKeyError {
	pub sequence: Sequence,
	pub first: usize,
	pub second: usize,
}
