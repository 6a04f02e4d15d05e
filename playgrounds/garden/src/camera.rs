use bevy::{
	input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
	prelude::*,
};
use engine::MirrorViewer;
use std::f32::consts::PI;

const PITCH_LIMIT: f32 = PI / 2.0 - 0.1;
/// Pixel-unit scroll deltas per line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Orbits the camera around a fixed target point.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitController {
	pub target: Vec3,
	pub distance: f32,
	pub yaw: f32,
	pub pitch: f32,
	pub sensitivity: f32,
	/// Fraction of the distance covered per scroll line.
	pub zoom_speed: f32,
	pub min_distance: f32,
	pub max_distance: f32,
}

impl OrbitController {
	pub fn looking_from(position: Vec3, target: Vec3) -> Self {
		let offset = position - target;
		let distance = offset.length();
		let pitch = if distance > 0.0 { (offset.y / distance).asin() } else { 0.0 };
		let yaw = offset.x.atan2(offset.z);

		Self {
			target,
			distance,
			yaw,
			pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
			sensitivity: 0.005,
			zoom_speed: 0.1,
			min_distance: 10.0,
			max_distance: 400.0,
		}
		.clamped()
	}

	fn clamped(mut self) -> Self {
		self.distance = self.distance.clamp(self.min_distance, self.max_distance);
		self
	}

	pub fn rotate(&mut self, delta: Vec2) {
		self.yaw -= delta.x * self.sensitivity;
		self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
	}

	/// Positive lines move closer.
	pub fn zoom(&mut self, lines: f32) {
		self.distance = (self.distance * (1.0 - self.zoom_speed).powf(lines))
			.clamp(self.min_distance, self.max_distance);
	}

	pub fn position(&self) -> Vec3 {
		let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
		let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
		self.target
			+ self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
	}

	pub fn transform(&self) -> Transform {
		Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
	}
}

pub fn setup_camera(mut commands: Commands) {
	let controller =
		OrbitController::looking_from(Vec3::new(0.0, 75.0, 160.0), Vec3::new(0.0, 40.0, 0.0));

	log::info!(
		"Setting up camera at {:?}, orbiting {:?} at distance {}",
		controller.position(),
		controller.target,
		controller.distance
	);

	commands.spawn((
		Camera3d::default(),
		controller.transform(),
		Projection::Perspective(PerspectiveProjection {
			fov: 45.0_f32.to_radians(),
			near: 1.0,
			far: 500.0,
			..default()
		}),
		controller,
		MirrorViewer,
	));
}

pub fn orbit_camera(
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mut mouse_motion: MessageReader<MouseMotion>,
	mut mouse_wheel: MessageReader<MouseWheel>,
	mut query: Query<(&mut Transform, &mut OrbitController)>,
) {
	let mut motion = Vec2::ZERO;
	for event in mouse_motion.read() {
		motion += event.delta;
	}

	let mut lines = 0.0;
	for event in mouse_wheel.read() {
		lines += match event.unit {
			MouseScrollUnit::Line => event.y,
			MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
		};
	}

	let Ok((mut transform, mut controller)) = query.single_mut() else {
		return;
	};

	if mouse_buttons.pressed(MouseButton::Left) && motion != Vec2::ZERO {
		controller.rotate(motion);
	}
	if lines != 0.0 {
		controller.zoom(lines);
	}

	*transform = controller.transform();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn start() -> OrbitController {
		OrbitController::looking_from(Vec3::new(0.0, 75.0, 160.0), Vec3::new(0.0, 40.0, 0.0))
	}

	#[test]
	fn test_round_trips_start_position() {
		let controller = start();
		assert!(controller.position().abs_diff_eq(Vec3::new(0.0, 75.0, 160.0), 1e-3));
		assert_eq!(controller.yaw, 0.0);
	}

	#[test]
	fn test_zoom_clamps_distance() {
		let mut controller = start();
		controller.zoom(1000.0);
		assert_eq!(controller.distance, 10.0);
		controller.zoom(-1000.0);
		assert_eq!(controller.distance, 400.0);
	}

	#[test]
	fn test_pitch_stays_below_poles() {
		let mut controller = start();
		controller.rotate(Vec2::new(0.0, 1.0e6));
		assert_eq!(controller.pitch, PITCH_LIMIT);
		controller.rotate(Vec2::new(0.0, -1.0e6));
		assert_eq!(controller.pitch, -PITCH_LIMIT);
	}

	#[test]
	fn test_transform_faces_target() {
		let mut controller = start();
		controller.rotate(Vec2::new(120.0, -40.0));
		let transform = controller.transform();
		let expected = (controller.target - transform.translation).normalize();
		assert!(transform.forward().abs_diff_eq(expected, 1e-4));
		assert!((transform.translation.distance(controller.target) - controller.distance).abs() < 1e-3);
	}
}
