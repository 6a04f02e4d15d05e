use crate::GardenConfig;
use bevy::prelude::*;
use engine::mirror::{spawn_mirror, MirrorSpec};
use flora::variant::palette_color;
use std::f32::consts::{FRAC_PI_2, PI};

/// Walls are a touch larger than the room so their edges overlap.
const WALL_SIZE: f32 = 100.1;
const ROOM_HALF: f32 = 50.0;
const ROOM_HEIGHT: f32 = 100.0;

const GROUND_MIRROR_TINT: u32 = 0x777777;
const WALL_MIRROR_SIZE: f32 = 60.0;
const WALL_MIRROR_TINT: u32 = 0x889999;

#[derive(Component)]
pub struct Wall;

/// Placement of each wall, facing into the room.
fn wall_transforms() -> [Transform; 5] {
	[
		// ceiling
		Transform::from_xyz(0.0, ROOM_HEIGHT, 0.0)
			.with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
		// back
		Transform::from_xyz(0.0, ROOM_HALF, -ROOM_HALF),
		// front
		Transform::from_xyz(0.0, ROOM_HALF, ROOM_HALF)
			.with_rotation(Quat::from_rotation_y(PI)),
		// left
		Transform::from_xyz(-ROOM_HALF, ROOM_HALF, 0.0)
			.with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
		// right
		Transform::from_xyz(ROOM_HALF, ROOM_HALF, 0.0)
			.with_rotation(Quat::from_rotation_y(-FRAC_PI_2)),
	]
}

pub fn setup_room(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	mut images: ResMut<Assets<Image>>,
	config: Res<GardenConfig>,
) {
	log::info!("Setting up room with {}px mirrors", config.mirror_resolution);

	let wall_mesh = meshes.add(Rectangle::new(WALL_SIZE, WALL_SIZE));
	let wall_material = materials.add(StandardMaterial {
		base_color: Color::WHITE,
		perceptual_roughness: 1.0,
		..default()
	});

	for transform in wall_transforms() {
		commands.spawn((
			Mesh3d(wall_mesh.clone()),
			MeshMaterial3d(wall_material.clone()),
			transform,
			Wall,
		));
	}

	// The ground renders first so the wall mirror can pick it up a frame later.
	spawn_mirror(
		&mut commands,
		&mut meshes,
		&mut materials,
		&mut images,
		MirrorSpec {
			size: WALL_SIZE,
			transform: Transform::from_xyz(0.0, 0.0, 0.0)
				.with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
			tint: palette_color(GROUND_MIRROR_TINT),
			resolution: config.mirror_resolution,
			order: -2,
			far: 500.0,
		},
	);

	spawn_mirror(
		&mut commands,
		&mut meshes,
		&mut materials,
		&mut images,
		MirrorSpec {
			size: WALL_MIRROR_SIZE,
			transform: Transform::from_xyz(0.0, 35.0, -45.0),
			tint: palette_color(WALL_MIRROR_TINT),
			resolution: config.mirror_resolution,
			order: -1,
			far: 500.0,
		},
	);
}

pub fn setup_lighting(mut commands: Commands) {
	commands.insert_resource(AmbientLight {
		color: Color::WHITE,
		brightness: 150.0,
		affects_lightmapped_meshes: true,
	});

	commands.spawn((
		PointLight {
			color: palette_color(0xcccccc),
			intensity: 4_000_000.0,
			range: 250.0,
			shadows_enabled: false,
			..default()
		},
		Transform::from_xyz(0.0, 60.0, 0.0),
	));
}
