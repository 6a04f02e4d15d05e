use crate::{
	beds::FlowerBeds,
	frame::{advance, FrameInput, GardenState, RenderCommand},
	stage::CommandStage,
};
use bevy::prelude::*;
use flora::{LatheBuilder, Variant};
use render_item::HandleMap;
use std::collections::HashMap;

/// Marks an entity spawned for a flower.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowerPart {
	pub variant: Variant,
	pub layer: usize,
	pub sector: usize,
}

/// Application state of the garden plus the scene bookkeeping that goes with it.
#[derive(Resource)]
pub struct Garden {
	state: GardenState,
	beds: FlowerBeds<Entity>,
	lathes: HandleMap<LatheBuilder>,
	palette: HashMap<u32, Handle<StandardMaterial>>,
}

impl Garden {
	pub fn new(state: GardenState) -> Self {
		Self {
			state,
			beds: FlowerBeds::new(),
			lathes: HandleMap::new(),
			palette: HashMap::new(),
		}
	}

	pub fn state(&self) -> &GardenState {
		&self.state
	}

	pub fn beds(&self) -> &FlowerBeds<Entity> {
		&self.beds
	}

	/// Number of distinct lathe meshes built so far.
	pub fn cached_meshes(&self) -> usize {
		self.lathes.count()
	}
}

impl Default for Garden {
	fn default() -> Self {
		Self::new(GardenState::default())
	}
}

/// Advances the garden one frame and applies the resulting scene changes.
pub fn tend_garden(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	input: Res<FrameInput>,
	garden: ResMut<Garden>,
) {
	let (state, render_commands) = advance(garden.state.clone(), *input);
	if render_commands.is_empty() && state == garden.state {
		return;
	}

	let garden = garden.into_inner();
	garden.state = state;

	let mut stage = CommandStage::new(
		&mut commands,
		&mut meshes,
		&mut materials,
		&garden.lathes,
		&mut garden.palette,
	);

	for command in render_commands {
		match command {
			RenderCommand::Regenerate { variant, offset, bloom } => {
				match flora::generate(bloom.value(), variant, offset) {
					Ok(solids) => {
						let removed = garden.beds.replace(&mut stage, variant, solids);
						log::debug!(
							"Regenerated {} at bloom {} ({} shapes replaced, {} now)",
							variant,
							bloom,
							removed,
							garden.beds.count(variant)
						);
					}
					Err(e) => {
						log::error!("Failed to regenerate {}: {}", variant, e);
					}
				}
			}
			RenderCommand::Clear { variant } => {
				let removed = garden.beds.clear(&mut stage, variant);
				log::info!("Uprooted {} ({} shapes removed)", variant, removed);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::frame::{Planting, RegeneratePolicy};
	use bevy::ecs::system::RunSystemOnce;

	fn garden_world(state: GardenState) -> World {
		let mut world = World::new();
		world.init_resource::<Assets<Mesh>>();
		world.init_resource::<Assets<StandardMaterial>>();
		world.insert_resource(FrameInput::default());
		world.insert_resource(Garden::new(state));
		world
	}

	fn parts(world: &mut World, variant: Variant) -> usize {
		world.query::<&FlowerPart>().iter(world).filter(|part| part.variant == variant).count()
	}

	#[test]
	fn test_tend_garden_replaces_shapes() {
		let state = GardenState::new(
			vec![Planting::new(Variant::Blue), Planting::new(Variant::Red)],
			RegeneratePolicy::OnChange,
		);
		let mut world = garden_world(state);

		world.run_system_once(tend_garden).unwrap();
		assert_eq!(parts(&mut world, Variant::Blue), 8);
		assert_eq!(parts(&mut world, Variant::Red), 11);

		world.resource_mut::<FrameInput>().increase = true;
		world.run_system_once(tend_garden).unwrap();
		assert_eq!(parts(&mut world, Variant::Blue), 8);
		assert_eq!(parts(&mut world, Variant::Red), 11);
		assert_eq!(world.resource::<Garden>().beds().total(), 19);
	}

	#[test]
	fn test_revisited_bloom_reuses_meshes() {
		let mut world = garden_world(GardenState::default());
		world.run_system_once(tend_garden).unwrap();
		let after_first = world.resource::<Garden>().cached_meshes();
		assert_eq!(after_first, 8);

		world.resource_mut::<FrameInput>().increase = true;
		world.run_system_once(tend_garden).unwrap();
		world.resource_mut::<FrameInput>().increase = false;
		world.resource_mut::<FrameInput>().decrease = true;
		world.run_system_once(tend_garden).unwrap();

		assert_eq!(world.resource::<Garden>().cached_meshes(), 16);
		assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 8);
		assert_eq!(parts(&mut world, Variant::Blue), 8);
	}

	#[test]
	fn test_idle_frame_leaves_garden_unchanged() {
		let mut world = garden_world(GardenState::default());
		world.run_system_once(tend_garden).unwrap();
		world.clear_trackers();

		world.run_system_once(tend_garden).unwrap();
		assert!(!world.is_resource_changed::<Garden>());

		world.resource_mut::<FrameInput>().increase = true;
		world.run_system_once(tend_garden).unwrap();
		assert!(world.is_resource_changed::<Garden>());
	}

	#[test]
	fn test_uprooting_despawns_only_that_variant() {
		let state = GardenState::new(
			vec![Planting::new(Variant::Orange), Planting::new(Variant::Red)],
			RegeneratePolicy::OnChange,
		);
		let mut world = garden_world(state);
		world.run_system_once(tend_garden).unwrap();

		world.resource_mut::<FrameInput>().toggle = Some(Variant::Orange);
		world.run_system_once(tend_garden).unwrap();

		assert_eq!(parts(&mut world, Variant::Orange), 0);
		assert_eq!(parts(&mut world, Variant::Red), 11);
	}
}
