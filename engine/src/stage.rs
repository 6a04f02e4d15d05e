use crate::garden::FlowerPart;
use bevy::prelude::*;
use flora::{LatheBuilder, Solid};
use render_item::{HandleMap, MeshFetcher, MeshHandle};
use std::collections::HashMap;

/// The scene-graph capability generated solids are applied through.
pub trait Stage {
	type Handle: Copy;

	/// Inserts a solid into the scene. Returns `None` if it has no geometry.
	fn add_to_scene(&mut self, solid: &Solid) -> Option<Self::Handle>;

	/// Removes a previously added solid.
	fn remove_from_scene(&mut self, handle: Self::Handle);
}

/// Unlit and visible from both sides, since lathes are open surfaces.
pub fn petal_material(color: Color) -> StandardMaterial {
	StandardMaterial {
		base_color: color,
		unlit: true,
		double_sided: true,
		cull_mode: None,
		..default()
	}
}

/// Stage backed by Bevy commands. Meshes are shared through the lathe cache and
/// each palette color gets a single material.
pub struct CommandStage<'a, 'w, 's> {
	commands: &'a mut Commands<'w, 's>,
	meshes: &'a mut Assets<Mesh>,
	materials: &'a mut Assets<StandardMaterial>,
	lathes: &'a HandleMap<LatheBuilder>,
	palette: &'a mut HashMap<u32, Handle<StandardMaterial>>,
}

impl<'a, 'w, 's> CommandStage<'a, 'w, 's> {
	pub fn new(
		commands: &'a mut Commands<'w, 's>,
		meshes: &'a mut Assets<Mesh>,
		materials: &'a mut Assets<StandardMaterial>,
		lathes: &'a HandleMap<LatheBuilder>,
		palette: &'a mut HashMap<u32, Handle<StandardMaterial>>,
	) -> Self {
		Self { commands, meshes, materials, lathes, palette }
	}

	fn material_for(&mut self, solid: &Solid) -> Handle<StandardMaterial> {
		let materials = &mut *self.materials;
		self.palette
			.entry(solid.color)
			.or_insert_with(|| materials.add(petal_material(solid.color())))
			.clone()
	}
}

impl Stage for CommandStage<'_, '_, '_> {
	type Handle = Entity;

	fn add_to_scene(&mut self, solid: &Solid) -> Option<Entity> {
		let mesh = MeshHandle::new(solid.lathe.clone())
			.with_handle_cache(self.lathes.clone())
			.fetch_mesh(&mut *self.meshes)?;
		let material = self.material_for(solid);

		let entity = self
			.commands
			.spawn((
				Mesh3d(mesh),
				MeshMaterial3d(material),
				solid.transform(),
				FlowerPart { variant: solid.variant, layer: solid.layer, sector: solid.sector.index },
			))
			.id();
		Some(entity)
	}

	fn remove_from_scene(&mut self, handle: Entity) {
		self.commands.entity(handle).despawn();
	}
}
