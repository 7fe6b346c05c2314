use crate::{
	scratch::{Scratch, Temp},
	Block, DuplicateKeyError, ReconcileOptions, Sequence,
};
use core::hash::Hash;
use hashbrown::{hash_map::Entry, HashMap};
use tracing::{error, instrument, trace, trace_span, warn};

/// The positional half of a list renderer: it owns wherever blocks are displayed.
///
/// An `anchor` of [`None`] stands for the end of the list's region, for example the end of the parent element
/// or a trailing placeholder node that only the host knows about.
pub trait Host<K> {
	/// Render state stored in each [`Block`].
	type State;

	/// Places a freshly created block immediately before `anchor`.
	fn insert_before(&mut self, block: &Block<K, Self::State>, anchor: Option<&Block<K, Self::State>>);

	/// Moves an already placed block to immediately before `anchor`.
	///
	/// Defaults to [`Host::insert_before`], which is correct for hosts where insertion moves (like the DOM's ***insertBefore***).
	fn move_before(&mut self, block: &Block<K, Self::State>, anchor: Option<&Block<K, Self::State>>) {
		self.insert_before(block, anchor);
	}

	/// Removes a block whose key is gone. The block is handed over by value and won't be seen again.
	fn destroy(&mut self, block: Block<K, Self::State>);
}

/// A [`Host`] that can also create and update blocks from items of type `T`.
pub trait Renderer<K, T>: Host<K> {
	fn create(&mut self, key: &K, item: &T) -> Self::State;

	/// Called for each retained block if [`ReconcileOptions::dynamic`] is set.
	///
	/// The default implementation does nothing.
	fn update(&mut self, block: &mut Block<K, Self::State>, item: &T) {
		let _ = (block, item);
	}
}

/// Callback counts of one reconciliation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Report {
	pub created: usize,
	/// Blocks carried over from the old sequence, whether updated or not.
	pub retained: usize,
	pub updated: usize,
	pub inserted: usize,
	pub moved: usize,
	pub destroyed: usize,
}
impl Report {
	/// Whether the update had no positional effect at all.
	#[must_use]
	pub fn is_stable(&self) -> bool {
		self.created == 0 && self.inserted == 0 && self.moved == 0 && self.destroyed == 0
	}
}

/// Replaces `blocks` with blocks matching `items`, reusing the block of each key present in both.
///
/// Callbacks are made in this order:
///
/// 1. [`Renderer::create`] or [`Renderer::update`] for each item, back to front,
/// 2. interleaved [`Host::destroy`], [`Host::insert_before`] and [`Host::move_before`] calls, back to front.
///
/// Positioning follows a greedy walk from both ends: where old and new order disagree,
/// the block that's further away from its previous index moves. On ties, the old side's block is marked to move later.
/// This isn't minimal, but deterministic and linear.
///
/// # Errors
///
/// Iff either sequence contains a key more than once. Nothing is called back in that case and `blocks` is unchanged.
#[instrument(skip(blocks, items, key_of, renderer), fields(old_len = blocks.len(), new_len = items.len()))]
pub fn reconcile<K, T, R>(
	blocks: &mut Vec<Block<K, R::State>>,
	items: &[T],
	key_of: impl FnMut(&T) -> K,
	renderer: &mut R,
	options: ReconcileOptions,
) -> Result<Report, DuplicateKeyError>
where
	K: Hash + Eq,
	R: Renderer<K, T> + ?Sized,
{
	reconcile_with_scratch(blocks, items, key_of, renderer, options, &mut Scratch::new())
}

#[allow(clippy::too_many_lines)]
pub(crate) fn reconcile_with_scratch<K, T, R>(
	blocks: &mut Vec<Block<K, R::State>>,
	items: &[T],
	key_of: impl FnMut(&T) -> K,
	renderer: &mut R,
	options: ReconcileOptions,
	scratch: &mut Scratch,
) -> Result<Report, DuplicateKeyError>
where
	K: Hash + Eq,
	R: Renderer<K, T> + ?Sized,
{
	let old_len = blocks.len();
	let new_len = items.len();
	let mut report = Report::default();

	let keys: Vec<K> = items.iter().map(key_of).collect();
	let Temp { sources, targets, will_move, did_move } = scratch.temp();

	{
		let span = trace_span!("Indexing keys");
		let _enter = span.enter();

		let mut new_indices = HashMap::with_capacity(new_len);
		for (i, key) in keys.iter().enumerate() {
			match new_indices.entry(key) {
				Entry::Occupied(occupied) => return Err(duplicate(Sequence::New, *occupied.get(), i)),
				Entry::Vacant(vacant) => {
					vacant.insert(i);
				}
			}
		}

		let mut old_indices = HashMap::with_capacity(old_len);
		for (i, block) in blocks.iter().enumerate() {
			match old_indices.entry(block.key()) {
				Entry::Occupied(occupied) => return Err(duplicate(Sequence::Old, *occupied.get(), i)),
				Entry::Vacant(vacant) => {
					vacant.insert(i);
				}
			}
			targets.push(new_indices.get(block.key()).copied());
		}

		sources.extend(keys.iter().map(|key| old_indices.get(key).copied()));
	}

	let mut old_slots: Vec<Option<Block<K, R::State>>> = blocks.drain(..).map(Some).collect();
	let mut new_blocks = Vec::with_capacity(new_len);
	{
		let span = trace_span!("Resolving blocks");
		let _enter = span.enter();

		for (i, (item, key)) in items.iter().zip(keys).enumerate().rev() {
			let retained = sources[i].and_then(|o| old_slots.get_mut(o).and_then(Option::take));
			let block = match retained {
				Some(mut block) => {
					report.retained += 1;
					if options.dynamic() {
						renderer.update(&mut block, item);
						report.updated += 1;
					}
					block
				}
				None => {
					if sources[i].is_some() {
						error!("Old block for new index {} was already taken. Creating a replacement.", i);
						sources[i] = None;
					}
					let state = renderer.create(&key, item);
					report.created += 1;
					Block::new(key, state)
				}
			};
			new_blocks.push(block);
		}
		new_blocks.reverse();
	}

	will_move.resize(new_len, false);
	did_move.resize(new_len, false);

	let mut o = old_len;
	let mut n = new_len;
	{
		let span = trace_span!("Walking", o, n);
		let _enter = span.enter();

		while o > 0 && n > 0 {
			let new_index = n - 1;
			let old_index = o - 1;
			match targets[old_index] {
				Some(target) if target == new_index => {
					trace!(old_index, new_index, "Unchanged.");
					o -= 1;
					n -= 1;
				}
				None => {
					destroy(renderer, &mut old_slots, old_index, &mut report);
					o -= 1;
				}
				Some(target) => {
					if sources[new_index].is_none() || will_move[new_index] {
						place(renderer, &new_blocks, new_index, sources[new_index].is_none(), &mut report);
						n -= 1;
					} else if did_move[target] {
						trace!(old_index, "Skipping block that was already moved.");
						o -= 1;
					} else if displacement(sources.as_slice(), new_index) > displacement(sources.as_slice(), target) {
						did_move[new_index] = true;
						place(renderer, &new_blocks, new_index, false, &mut report);
						n -= 1;
					} else {
						trace!(old_index, target, "Deferring move.");
						will_move[target] = true;
						o -= 1;
					}
				}
			}
		}
	}

	{
		let span = trace_span!("Flushing", o, n);
		let _enter = span.enter();

		while o > 0 {
			o -= 1;
			if targets[o].is_none() {
				destroy(renderer, &mut old_slots, o, &mut report);
			}
		}
		while n > 0 {
			n -= 1;
			place(renderer, &new_blocks, n, sources[n].is_none(), &mut report);
		}
	}

	debug_assert!(old_slots.iter().all(Option::is_none), "Old blocks were neither retained nor destroyed");
	debug_assert_eq!(report.created + report.retained, new_len);

	*blocks = new_blocks;
	trace!(?report, "Reconciled.");
	Ok(report)
}

fn duplicate(sequence: Sequence, first: usize, second: usize) -> DuplicateKeyError {
	let error = DuplicateKeyError { sequence, first, second };
	warn!("{}", error);
	error
}

fn displacement(sources: &[Option<usize>], new_index: usize) -> usize {
	match sources[new_index] {
		Some(old_index) if old_index > new_index => old_index - new_index,
		Some(old_index) => new_index - old_index,
		None => {
			error!("Displacement of fresh block at {} requested.", new_index);
			0
		}
	}
}

fn place<K, H: Host<K> + ?Sized>(host: &mut H, blocks: &[Block<K, H::State>], index: usize, fresh: bool, report: &mut Report) {
	let block = &blocks[index];
	let anchor = blocks.get(index + 1);
	if fresh {
		trace!(index, "Inserting.");
		host.insert_before(block, anchor);
		report.inserted += 1;
	} else {
		trace!(index, "Moving.");
		host.move_before(block, anchor);
		report.moved += 1;
	}
}

fn destroy<K, H: Host<K> + ?Sized>(host: &mut H, slots: &mut [Option<Block<K, H::State>>], index: usize, report: &mut Report) {
	match slots.get_mut(index).and_then(Option::take) {
		Some(block) => {
			trace!(index, "Destroying.");
			host.destroy(block);
			report.destroyed += 1;
		}
		None => error!("Expected to destroy old block {} but it was already taken. Skipping.", index),
	}
}
