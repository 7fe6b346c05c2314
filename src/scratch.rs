/// Working buffers of a single reconciliation, kept between calls to reuse their heap allocations.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
	sources: Vec<Option<usize>>,
	targets: Vec<Option<usize>>,
	will_move: Vec<bool>,
	did_move: Vec<bool>,
}

/// The cleared buffers of a [`Scratch`], borrowed for one reconciliation.
pub(crate) struct Temp<'a> {
	/// Old index for each new index, if the key was present before.
	pub sources: &'a mut Vec<Option<usize>>,
	/// New index for each old index, if the key is still present.
	pub targets: &'a mut Vec<Option<usize>>,
	/// By new index.
	pub will_move: &'a mut Vec<bool>,
	/// By new index.
	pub did_move: &'a mut Vec<bool>,
}

impl Scratch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn temp(&mut self) -> Temp<'_> {
		// Cleared before each borrow, so nothing can leak between reconciliations even after an unwind out of a callback.
		self.sources.clear();
		self.targets.clear();
		self.will_move.clear();
		self.did_move.clear();
		Temp {
			sources: &mut self.sources,
			targets: &mut self.targets,
			will_move: &mut self.will_move,
			did_move: &mut self.did_move,
		}
	}

	/// Retrieves the largest buffer capacity (in elements) without clearing first.
	pub fn capacity(&self) -> usize {
		self.sources.capacity().max(self.targets.capacity()).max(self.will_move.capacity()).max(self.did_move.capacity())
	}

	pub fn shrink_to_fit(&mut self) {
		self.sources = Vec::new();
		self.targets = Vec::new();
		self.will_move = Vec::new();
		self.did_move = Vec::new();
	}
}
