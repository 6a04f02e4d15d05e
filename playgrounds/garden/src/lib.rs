use bevy::prelude::*;

mod camera;
pub mod cli;
mod controls;
mod room;
mod ui;

use engine::{
	tend_garden, update_mirror_cameras, FrameInput, Garden, GardenState, Planting, RegeneratePolicy,
};
use flora::{Bloom, Variant};

pub use camera::OrbitController;

/// Startup configuration of the garden.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GardenConfig {
	pub plantings: Vec<Planting>,
	pub policy: RegeneratePolicy,
	pub bloom: Bloom,
	/// Width and height of each mirror texture, in pixels.
	pub mirror_resolution: u32,
}

impl GardenConfig {
	pub fn describe(&self) -> String {
		let variants: Vec<&str> =
			self.plantings.iter().map(|planting| planting.variant.name()).collect();
		format!("{} at bloom {} ({:?})", variants.join(", "), self.bloom, self.policy)
	}
}

impl Default for GardenConfig {
	fn default() -> Self {
		Self {
			plantings: vec![Planting::new(Variant::Blue)],
			policy: RegeneratePolicy::OnChange,
			bloom: Bloom::CLOSED,
			mirror_resolution: 512,
		}
	}
}

pub struct GardenPlugin {
	pub config: GardenConfig,
}

impl Plugin for GardenPlugin {
	fn build(&self, app: &mut App) {
		let state = GardenState::new(self.config.plantings.clone(), self.config.policy)
			.with_bloom(self.config.bloom);

		app.insert_resource(ClearColor(Color::BLACK))
			.insert_resource(self.config.clone())
			.insert_resource(Garden::new(state))
			.init_resource::<FrameInput>()
			.add_systems(
				Startup,
				(
					camera::setup_camera,
					room::setup_lighting,
					room::setup_room,
					ui::setup_bloom_ui,
				),
			)
			.add_systems(
				Update,
				(
					(controls::poll_keys, tend_garden, ui::update_bloom_display).chain(),
					(camera::orbit_camera, update_mirror_cameras).chain(),
				),
			);
	}
}
