/// Per-call configuration of [`reconcile`](`crate::reconcile()`) and [`KeyedList`](`crate::KeyedList`).
///
/// ```
/// use keyed_reconciler::ReconcileOptions;
///
/// let options = ReconcileOptions::new().with_dynamic(false);
/// assert!(!options.dynamic());
/// assert_eq!(options.scratch_warning_threshold(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReconcileOptions {
	dynamic: bool,
	scratch_warning_threshold: usize,
}
impl Default for ReconcileOptions {
	fn default() -> Self {
		Self::new()
	}
}
impl ReconcileOptions {
	#[must_use]
	pub const fn new() -> Self {
		Self { dynamic: true, scratch_warning_threshold: 1024 }
	}

	/// Whether [`Renderer::update`](`crate::Renderer::update`) is called for retained blocks.
	///
	/// Defaults to `true`. Lists whose item content can't change between updates may turn this off.
	#[must_use]
	pub const fn dynamic(self) -> bool {
		self.dynamic
	}

	#[must_use]
	pub const fn with_dynamic(self, dynamic: bool) -> Self {
		Self { dynamic, ..self }
	}

	/// Retained scratch buffer capacity (in elements) at which [`KeyedList`](`crate::KeyedList`) starts warning.
	#[must_use]
	pub const fn scratch_warning_threshold(self) -> usize {
		self.scratch_warning_threshold
	}

	#[must_use]
	pub const fn with_scratch_warning_threshold(self, scratch_warning_threshold: usize) -> Self {
		Self { scratch_warning_threshold, ..self }
	}
}
