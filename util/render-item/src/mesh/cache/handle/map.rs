use crate::mesh::{IdentifiedMesh, MeshId};
use bevy::prelude::*;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

/// Mesh handles keyed by the id of the builder that produced them.
///
/// Clones share the same underlying map, so every holder of a clone sees
/// handles cached by any other.
#[derive(Debug, Clone)]
pub struct HandleMap<T: IdentifiedMesh> {
	cache: Arc<RwLock<HashMap<MeshId, Handle<Mesh>>>>,
	phantom: PhantomData<fn() -> T>,
}

impl<T: IdentifiedMesh> HandleMap<T> {
	pub fn new() -> Self {
		Self { cache: Arc::new(RwLock::new(HashMap::new())), phantom: PhantomData }
	}

	pub fn get(&self, mesh_builder: &T) -> Option<Handle<Mesh>> {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.get(&mesh_builder.id()).cloned()
	}

	pub fn insert(&self, mesh_builder: &T, mesh: Handle<Mesh>) {
		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		cache.insert(mesh_builder.id(), mesh);
	}

	/// Number of cached handles.
	pub fn count(&self) -> usize {
		self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
	}
}

impl<T: IdentifiedMesh> Default for HandleMap<T> {
	fn default() -> Self {
		Self::new()
	}
}
