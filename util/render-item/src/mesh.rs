pub mod cache;
pub mod handle;

use bevy::prelude::*;
use cache::handle::MeshHandleCache;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshId(String);

impl MeshId {
	pub fn new(id: String) -> Self {
		Self(id)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

pub trait IdentifiedMesh {
	fn id(&self) -> MeshId;
}

pub trait MeshBuilder: Clone {
	/// Builds the mesh. Returns `None` when there is nothing to draw.
	fn build_mesh(&self) -> Option<Mesh>;
}

pub trait MeshFetcher: Clone + IdentifiedMesh {
	/// Builds mesh if it doesn't exist or fetches from the assets. Returns the handle to the mesh.
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Option<Handle<Mesh>>;
}

/// If it's already defined how the mesh is built and cached, this trait can be used to fetch the mesh.
impl<T: MeshBuilder + MeshHandleCache> MeshFetcher for T {
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Option<Handle<Mesh>> {
		if let Some(handle) = self.fetch_cached_mesh_handle() {
			return Some(handle);
		}

		self.build_mesh().map(|mesh| {
			let handle = meshes.add(mesh);
			log::debug!("Caching mesh handle for {}", self.id().as_str());
			self.cache_mesh_handle(handle.clone());
			handle
		})
	}
}
