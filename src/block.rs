/// A rendered list entry: a key paired with state owned by the [`Renderer`](`crate::Renderer`).
///
/// The reconciler never inspects [`state`](`Block::state`). Blocks are moved, never cloned, so a
/// key that persists across updates keeps the very same [`Block`] value.
#[derive(Debug, PartialEq, Eq)]
pub struct Block<K, S> {
	key: K,
	state: S,
}
impl<K, S> Block<K, S> {
	#[must_use]
	pub fn new(key: K, state: S) -> Self {
		Self { key, state }
	}

	#[must_use]
	pub fn key(&self) -> &K {
		&self.key
	}

	#[must_use]
	pub fn state(&self) -> &S {
		&self.state
	}

	pub fn state_mut(&mut self) -> &mut S {
		&mut self.state
	}

	#[must_use]
	pub fn into_parts(self) -> (K, S) {
		(self.key, self.state)
	}
}
