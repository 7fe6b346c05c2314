//! Reconciliation as a plain edit script over keys, without any render state.

use crate::{reconcile, Block, DuplicateKeyError, Host, ReconcileOptions, Renderer};
use core::hash::Hash;
use tracing::{error, instrument};

/// One recorded [`Renderer`] callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Edit<K> {
	Create(K),
	Update(K),
	/// A fresh block was placed before `before` (or at the end).
	Insert { key: K, before: Option<K> },
	/// A retained block was moved before `before` (or to the end).
	Move { key: K, before: Option<K> },
	Destroy(K),
}

/// A [`Renderer`] that records each callback as [`Edit`] and splices a mirrored key list accordingly.
///
/// Blocks carry no state (`()`), so this works for any item type.
#[derive(Debug, Clone)]
pub struct EditScript<K> {
	order: Vec<K>,
	edits: Vec<Edit<K>>,
}
impl<K> Default for EditScript<K> {
	fn default() -> Self {
		Self::new()
	}
}
impl<K> EditScript<K> {
	#[must_use]
	pub fn new() -> Self {
		Self { order: Vec::new(), edits: Vec::new() }
	}

	/// Starts from an already displayed key order, usually that of the blocks about to be reconciled.
	#[must_use]
	pub fn with_order(order: Vec<K>) -> Self {
		Self { order, edits: Vec::new() }
	}

	/// The mirrored key order after all edits so far.
	#[must_use]
	pub fn order(&self) -> &[K] {
		&self.order
	}

	#[must_use]
	pub fn edits(&self) -> &[Edit<K>] {
		&self.edits
	}

	/// Takes the recorded edits, keeping the mirrored order.
	pub fn take_edits(&mut self) -> Vec<Edit<K>> {
		core::mem::take(&mut self.edits)
	}

	#[must_use]
	pub fn into_parts(self) -> (Vec<K>, Vec<Edit<K>>) {
		(self.order, self.edits)
	}
}
impl<K: Eq + Clone> EditScript<K> {
	fn splice(&mut self, key: &K, before: Option<&K>) {
		if let Some(current) = self.order.iter().position(|k| k == key) {
			self.order.remove(current);
		}
		let index = match before {
			None => self.order.len(),
			Some(before) => match self.order.iter().position(|k| k == before) {
				Some(index) => index,
				None => {
					error!("Anchor missing from the mirrored order. Appending instead.");
					self.order.len()
				}
			},
		};
		self.order.insert(index, key.clone());
	}
}

impl<K: Eq + Clone> Host<K> for EditScript<K> {
	type State = ();

	fn insert_before(&mut self, block: &Block<K, ()>, anchor: Option<&Block<K, ()>>) {
		self.splice(block.key(), anchor.map(Block::key));
		self.edits.push(Edit::Insert { key: block.key().clone(), before: anchor.map(|anchor| anchor.key().clone()) });
	}

	fn move_before(&mut self, block: &Block<K, ()>, anchor: Option<&Block<K, ()>>) {
		self.splice(block.key(), anchor.map(Block::key));
		self.edits.push(Edit::Move { key: block.key().clone(), before: anchor.map(|anchor| anchor.key().clone()) });
	}

	fn destroy(&mut self, block: Block<K, ()>) {
		let (key, ()) = block.into_parts();
		match self.order.iter().position(|k| k == &key) {
			Some(index) => {
				self.order.remove(index);
			}
			None => error!("Destroyed key missing from the mirrored order."),
		}
		self.edits.push(Edit::Destroy(key));
	}
}

impl<K: Eq + Clone, T> Renderer<K, T> for EditScript<K> {
	fn create(&mut self, key: &K, _: &T) {
		self.edits.push(Edit::Create(key.clone()));
	}

	fn update(&mut self, block: &mut Block<K, ()>, _: &T) {
		self.edits.push(Edit::Update(block.key().clone()));
	}
}

/// Computes the edit script that turns the key list `old` into the keys of `items`.
///
/// ```
/// use keyed_reconciler::splice::{diff, Edit};
///
/// let script = diff(&['a', 'b', 'c'], &['c', 'x', 'a'], |&c| c).unwrap();
/// assert_eq!(script.order(), ['c', 'x', 'a']);
/// assert!(script.edits().contains(&Edit::Destroy('b')));
/// assert!(script.edits().contains(&Edit::Create('x')));
/// ```
///
/// # Errors
///
/// Iff `old` or the keys of `items` contain duplicates.
#[instrument(skip(old, items, key_of), fields(old_len = old.len(), new_len = items.len()))]
pub fn diff<K, T>(old: &[K], items: &[T], key_of: impl FnMut(&T) -> K) -> Result<EditScript<K>, DuplicateKeyError>
where
	K: Hash + Eq + Clone,
{
	let mut blocks: Vec<Block<K, ()>> = old.iter().cloned().map(|key| Block::new(key, ())).collect();
	let mut script = EditScript::with_order(old.to_vec());
	reconcile(&mut blocks, items, key_of, &mut script, ReconcileOptions::new())?;
	Ok(script)
}
