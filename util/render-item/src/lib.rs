pub mod mesh;

pub use mesh::{
	cache::handle::{map::HandleMap, MeshHandleCache},
	handle::MeshHandle,
	IdentifiedMesh, MeshBuilder, MeshFetcher, MeshId,
};
