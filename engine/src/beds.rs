use crate::stage::Stage;
use flora::{Solid, Variant};
use std::collections::BTreeMap;

/// The live shape set of every planted variant.
///
/// A variant's set is only ever swapped whole: replacing it removes every
/// tracked shape of that variant before the new ones are added.
#[derive(Debug, Clone)]
pub struct FlowerBeds<H> {
	beds: BTreeMap<Variant, Vec<H>>,
}

impl<H: Copy> FlowerBeds<H> {
	pub fn new() -> Self {
		Self { beds: BTreeMap::new() }
	}

	pub fn count(&self, variant: Variant) -> usize {
		self.beds.get(&variant).map_or(0, Vec::len)
	}

	pub fn total(&self) -> usize {
		self.beds.values().map(Vec::len).sum()
	}

	pub fn handles(&self, variant: Variant) -> &[H] {
		self.beds.get(&variant).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn variants(&self) -> impl Iterator<Item = Variant> + '_ {
		self.beds.keys().copied()
	}

	/// Swaps in `solids` as the shape set of `variant`. Returns how many shapes were removed.
	pub fn replace<S: Stage<Handle = H>>(
		&mut self,
		stage: &mut S,
		variant: Variant,
		solids: impl IntoIterator<Item = Solid>,
	) -> usize {
		let removed = self.clear(stage, variant);

		let handles: Vec<H> =
			solids.into_iter().filter_map(|solid| stage.add_to_scene(&solid)).collect();
		if !handles.is_empty() {
			self.beds.insert(variant, handles);
		}

		removed
	}

	/// Removes every tracked shape of `variant`. Returns how many were removed.
	pub fn clear<S: Stage<Handle = H>>(&mut self, stage: &mut S, variant: Variant) -> usize {
		let previous = self.beds.remove(&variant).unwrap_or_default();
		for handle in &previous {
			stage.remove_from_scene(*handle);
		}
		previous.len()
	}
}

impl<H: Copy> Default for FlowerBeds<H> {
	fn default() -> Self {
		Self::new()
	}
}
