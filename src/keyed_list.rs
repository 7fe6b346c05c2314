use crate::{
	reconcile::{reconcile_with_scratch, Host, Renderer, Report},
	scratch::Scratch,
	Block, DuplicateKeyError, ReconcileOptions,
};
use core::{hash::Hash, slice};
use tracing::{info, instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};

/// Owns the blocks of one keyed list between updates.
///
/// This is the stateful counterpart of [`reconcile`](`crate::reconcile()`): it keeps the current blocks
/// and reuses its working buffers across calls.
///
/// # Correct Use
///
/// The [`Renderer`] passed to [`KeyedList::update`] and [`KeyedList::clear`] should be the one (or equivalent to the one)
/// that created the blocks. Blocks are handed to it by value when destroyed.
///
/// ```
/// use keyed_reconciler::{Block, Host, KeyedList, Renderer};
///
/// #[derive(Default)]
/// struct Log(Vec<String>);
/// impl Host<u32> for Log {
/// 	type State = String;
///
/// 	fn insert_before(&mut self, block: &Block<u32, String>, anchor: Option<&Block<u32, String>>) {
/// 		self.0.push(format!("insert {} before {:?}", block.state(), anchor.map(Block::key)));
/// 	}
///
/// 	fn destroy(&mut self, block: Block<u32, String>) {
/// 		self.0.push(format!("destroy {}", block.state()));
/// 	}
/// }
/// impl<'a> Renderer<u32, (u32, &'a str)> for Log {
/// 	fn create(&mut self, _: &u32, &(_, text): &(u32, &'a str)) -> String {
/// 		text.to_string()
/// 	}
/// }
///
/// let mut list = KeyedList::new();
/// let mut log = Log::default();
///
/// list.update(&[(1, "milk"), (2, "eggs")], |&(id, _)| id, &mut log).unwrap();
/// list.update(&[(2, "eggs")], |&(id, _)| id, &mut log).unwrap();
///
/// assert_eq!(list.keys().copied().collect::<Vec<_>>(), [2]);
/// assert_eq!(log.0, ["insert eggs before None", "insert milk before Some(2)", "destroy milk"]);
/// ```
#[derive(Debug)]
pub struct KeyedList<K, S> {
	blocks: Vec<Block<K, S>>,
	options: ReconcileOptions,
	scratch: Scratch,
}
impl<K, S> Default for KeyedList<K, S> {
	fn default() -> Self {
		Self::new()
	}
}
impl<K, S> KeyedList<K, S> {
	#[must_use]
	pub fn new() -> Self {
		Self::with_options(ReconcileOptions::new())
	}

	#[must_use]
	pub fn with_options(options: ReconcileOptions) -> Self {
		Self { blocks: Vec::new(), options, scratch: Scratch::new() }
	}

	#[must_use]
	pub fn options(&self) -> ReconcileOptions {
		self.options
	}

	pub fn set_options(&mut self, options: ReconcileOptions) {
		self.options = options;
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// The current blocks, in list order.
	#[must_use]
	pub fn blocks(&self) -> &[Block<K, S>] {
		&self.blocks
	}

	pub fn iter(&self) -> slice::Iter<'_, Block<K, S>> {
		self.blocks.iter()
	}

	pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + DoubleEndedIterator + '_ {
		self.blocks.iter().map(Block::key)
	}

	/// Finds the block for `key` with a linear scan.
	#[must_use]
	pub fn get(&self, key: &K) -> Option<&Block<K, S>>
	where
		K: Eq,
	{
		self.blocks.iter().find(|block| block.key() == key)
	}

	pub fn get_mut(&mut self, key: &K) -> Option<&mut Block<K, S>>
	where
		K: Eq,
	{
		self.blocks.iter_mut().find(|block| block.key() == key)
	}

	#[must_use]
	pub fn position(&self, key: &K) -> Option<usize>
	where
		K: Eq,
	{
		self.blocks.iter().position(|block| block.key() == key)
	}

	/// Reconciles the current blocks against `items`.
	///
	/// See [`reconcile`](`crate::reconcile()`) for the order of callbacks.
	///
	/// # Errors
	///
	/// Iff either the current blocks or `items` contain a key more than once.
	/// The list is left unchanged and `renderer` isn't called in that case.
	#[instrument(skip(self, items, key_of, renderer), fields(len = self.blocks.len(), items_len = items.len()))]
	pub fn update<T, R>(&mut self, items: &[T], key_of: impl FnMut(&T) -> K, renderer: &mut R) -> Result<Report, DuplicateKeyError>
	where
		K: Hash + Eq,
		R: Renderer<K, T, State = S> + ?Sized,
	{
		let report = reconcile_with_scratch(&mut self.blocks, items, key_of, renderer, self.options, &mut self.scratch)?;

		info!(
			"Created/retained/destroyed: {}/{}/{}, inserted/moved: {}/{}",
			report.created, report.retained, report.destroyed, report.inserted, report.moved
		);

		let capacity = self.scratch.capacity();
		info!("Scratch capacity: {}", capacity);
		if STATIC_MAX_LEVEL >= Level::WARN && capacity >= self.options.scratch_warning_threshold() && capacity > 2 * self.blocks.len().max(items.len()) {
			warn!(
				"The scratch capacity is large ({}) compared to the current list length ({}).\n\
				Consider calling `KeyedList::shrink_scratch` after shrinking a large list.",
				capacity,
				self.blocks.len()
			);
		}

		Ok(report)
	}

	/// Destroys all blocks, back to front, and returns how many there were.
	#[instrument(skip(self, host), fields(len = self.blocks.len()))]
	pub fn clear<H>(&mut self, host: &mut H) -> usize
	where
		H: Host<K, State = S> + ?Sized,
	{
		let count = self.blocks.len();
		while let Some(block) = self.blocks.pop() {
			let span = trace_span!("Destroying block", index = self.blocks.len());
			let _enter = span.enter();
			host.destroy(block);
		}
		trace!("Destroyed {} block(s).", count);
		count
	}

	/// Releases the working buffers kept from earlier updates.
	pub fn shrink_scratch(&mut self) {
		self.scratch.shrink_to_fit();
	}
}

impl<'a, K, S> IntoIterator for &'a KeyedList<K, S> {
	type Item = &'a Block<K, S>;
	type IntoIter = slice::Iter<'a, Block<K, S>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
