use bevy::{
	asset::RenderAssetUsages,
	camera::{RenderTarget, SubCameraView},
	math::Affine2,
	prelude::*,
	render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
};

/// Closest the viewer may get to a mirror plane before its reflection is dropped.
const MIN_NEAR: f32 = 0.01;
/// Resolution of the virtual square image a mirror window is cut from.
const SUB_VIEW_RESOLUTION: u32 = 1 << 20;

/// A square planar mirror. The reflective face is the local +Z side of the entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Mirror {
	pub half_extent: f32,
}

/// The camera whose view the mirrors reflect.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MirrorViewer;

/// Off-screen camera rendering the reflection shown by `mirror`.
#[derive(Component, Debug, Clone, Copy)]
pub struct MirrorCamera {
	pub mirror: Entity,
}

/// Everything needed to put a mirror into the scene.
#[derive(Debug, Clone)]
pub struct MirrorSpec {
	pub size: f32,
	pub transform: Transform,
	pub tint: Color,
	/// Width and height of the reflection texture, in pixels.
	pub resolution: u32,
	/// Render order of the reflection camera; must come before the main camera.
	pub order: isize,
	pub far: f32,
}

/// Reflects `point` through the plane at `plane_point` with normal `normal`.
pub fn reflect_point(point: Vec3, plane_point: Vec3, normal: Vec3) -> Vec3 {
	let normal = normal.normalize_or_zero();
	point - 2.0 * (point - plane_point).dot(normal) * normal
}

/// Off-axis view through a mirror.
///
/// The camera sits at the eye mirrored through the plane and looks straight into
/// it, so the image plane is parallel to the mirror and the reflection texture maps
/// onto the quad without distortion. `window` is the mirror rectangle on the
/// unit-distance image plane in camera right/up coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectionView {
	pub transform: Transform,
	/// Distance from the mirrored eye to the mirror plane.
	pub near: f32,
	pub window: Rect,
}

impl ReflectionView {
	fn half_tan(&self) -> f32 {
		self.window.min.abs().max(self.window.max.abs()).max_element()
	}

	/// Vertical field of view of the square frustum the window is cut from.
	pub fn fov(&self) -> f32 {
		2.0 * self.half_tan().atan()
	}

	/// Crops the square frustum of `fov` down to the mirror window.
	pub fn sub_view(&self) -> SubCameraView {
		let half_tan = self.half_tan();
		let scale = SUB_VIEW_RESOLUTION as f32 / (2.0 * half_tan);
		SubCameraView {
			full_size: UVec2::splat(SUB_VIEW_RESOLUTION),
			// pixel rows grow downwards
			offset: Vec2::new(self.window.min.x + half_tan, half_tan - self.window.max.y) * scale,
			size: (self.window.size() * scale).round().as_uvec2().max(UVec2::ONE),
		}
	}
}

/// Computes the reflection camera for a viewer at `eye` and a mirror whose local
/// +Z is its reflective normal and local +Y its up.
///
/// Returns `None` when the eye is on or behind the mirror plane.
pub fn reflection_view(
	eye: Vec3,
	mirror: &Transform,
	half_extent: f32,
) -> Option<ReflectionView> {
	let normal = mirror.rotation * Vec3::Z;
	let up = mirror.rotation * Vec3::Y;
	let distance = (eye - mirror.translation).dot(normal);
	if distance <= MIN_NEAR {
		return None;
	}

	let mirrored_eye = reflect_point(eye, mirror.translation, normal);
	let transform = Transform::from_translation(mirrored_eye).looking_to(normal, up);

	let to_center = mirror.translation - mirrored_eye;
	let center = Vec2::new(to_center.dot(*transform.right()), to_center.dot(up)) / distance;
	let window = Rect::from_center_half_size(center, Vec2::splat(half_extent / distance));

	Some(ReflectionView { transform, near: distance, window })
}

/// Square render target for a reflection camera.
pub fn mirror_target(resolution: u32) -> Image {
	let size = Extent3d { width: resolution, height: resolution, depth_or_array_layers: 1 };
	let mut image = Image::new_fill(
		size,
		TextureDimension::D2,
		&[0, 0, 0, 255],
		TextureFormat::Bgra8UnormSrgb,
		RenderAssetUsages::default(),
	);
	image.texture_descriptor.usage =
		TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
	image
}

/// Spawns the mirror surface and its reflection camera. Returns the mirror entity.
///
/// The surface is single sided, so the reflection camera, which always sits behind
/// it, never sees the mirror it renders for.
pub fn spawn_mirror(
	commands: &mut Commands,
	meshes: &mut Assets<Mesh>,
	materials: &mut Assets<StandardMaterial>,
	images: &mut Assets<Image>,
	spec: MirrorSpec,
) -> Entity {
	let target = images.add(mirror_target(spec.resolution));

	let material = materials.add(StandardMaterial {
		base_color: spec.tint,
		base_color_texture: Some(target.clone()),
		unlit: true,
		// the reflection camera sees the scene from behind the mirror, so flip it back
		uv_transform: Affine2::from_scale_angle_translation(
			Vec2::new(-1.0, 1.0),
			0.0,
			Vec2::new(1.0, 0.0),
		),
		..default()
	});

	let mirror = commands
		.spawn((
			Mesh3d(meshes.add(Rectangle::new(spec.size, spec.size))),
			MeshMaterial3d(material),
			spec.transform,
			Mirror { half_extent: spec.size / 2.0 },
		))
		.id();

	commands.spawn((
		Camera3d::default(),
		Camera { order: spec.order, target: RenderTarget::Image(target.into()), ..default() },
		Projection::Perspective(PerspectiveProjection { far: spec.far, ..default() }),
		Transform::default(),
		MirrorCamera { mirror },
	));

	log::info!("Spawned mirror at {:?} (camera order {})", spec.transform.translation, spec.order);

	mirror
}

/// Moves every reflection camera to mirror the viewer's current view.
pub fn update_mirror_cameras(
	viewer_query: Query<&Transform, (With<MirrorViewer>, Without<MirrorCamera>)>,
	mirror_query: Query<(&Transform, &Mirror), Without<MirrorCamera>>,
	mut camera_query: Query<(&MirrorCamera, &mut Camera, &mut Transform, &mut Projection)>,
) {
	let Ok(viewer) = viewer_query.single() else {
		return;
	};

	for (mirror_camera, mut camera, mut transform, mut projection) in &mut camera_query {
		let Ok((mirror_transform, mirror)) = mirror_query.get(mirror_camera.mirror) else {
			continue;
		};

		// the mirror is single sided, nothing to render from behind it
		let Some(view) = reflection_view(viewer.translation, mirror_transform, mirror.half_extent)
		else {
			camera.is_active = false;
			continue;
		};

		camera.is_active = true;
		camera.sub_camera_view = Some(view.sub_view());
		*transform = view.transform;
		if let Projection::Perspective(perspective) = &mut *projection {
			perspective.fov = view.fov();
			perspective.near = view.near;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::camera::CameraProjection;
	use std::f32::consts::FRAC_PI_2;

	fn project(view: &ReflectionView, point: Vec3) -> Vec3 {
		let projection = PerspectiveProjection { fov: view.fov(), near: view.near, ..default() };
		let clip_from_view = projection.get_clip_from_view_for_sub(&view.sub_view());
		let local = view.transform.rotation.inverse() * (point - view.transform.translation);
		clip_from_view.project_point3(local)
	}

	/// Edge midpoints of the mirror must land on the edges of the reflection image,
	/// mirrored horizontally.
	fn assert_frames_mirror(eye: Vec3, mirror: Transform, half_extent: f32) {
		let view = reflection_view(eye, &mirror, half_extent).unwrap();
		let edges = [
			(Vec3::new(half_extent, 0.0, 0.0), Vec2::new(-1.0, 0.0)),
			(Vec3::new(-half_extent, 0.0, 0.0), Vec2::new(1.0, 0.0)),
			(Vec3::new(0.0, half_extent, 0.0), Vec2::new(0.0, 1.0)),
			(Vec3::new(0.0, -half_extent, 0.0), Vec2::new(0.0, -1.0)),
		];

		for (local, expected) in edges {
			let ndc = project(&view, mirror.transform_point(local)).truncate();
			assert!(ndc.abs_diff_eq(expected, 1e-3), "{local} projected to {ndc}, not {expected}");
		}
	}

	#[test]
	fn test_reflection_is_an_involution() {
		let plane_point = Vec3::new(0.0, 35.0, -45.0);
		let normal = Vec3::Z;
		let point = Vec3::new(3.0, 75.0, 160.0);

		let reflected = reflect_point(point, plane_point, normal);
		assert!(reflected.abs_diff_eq(Vec3::new(3.0, 75.0, -250.0), 1e-4));
		assert!(reflect_point(reflected, plane_point, normal).abs_diff_eq(point, 1e-4));
	}

	#[test]
	fn test_reflection_mirrors_distance_to_plane() {
		let reflected = reflect_point(Vec3::new(7.0, 12.0, -4.0), Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
		assert_eq!(reflected, Vec3::new(7.0, -12.0, -4.0));
	}

	#[test]
	fn test_reflection_camera_faces_mirror_plane() {
		let mirror = Transform::from_xyz(0.0, 35.0, -45.0);
		let view = reflection_view(Vec3::new(10.0, 75.0, 160.0), &mirror, 30.0).unwrap();

		assert!(view.transform.translation.abs_diff_eq(Vec3::new(10.0, 75.0, -250.0), 1e-3));
		assert!(view.transform.forward().abs_diff_eq(Vec3::Z, 1e-5));
		assert!(view.transform.up().abs_diff_eq(Vec3::Y, 1e-5));
		assert!((view.near - 205.0).abs() < 1e-3);
	}

	#[test]
	fn test_head_on_view_frames_mirror_exactly() {
		let view = reflection_view(Vec3::new(0.0, 0.0, 100.0), &Transform::IDENTITY, 30.0).unwrap();
		assert!((view.fov() - 2.0 * 0.3_f32.atan()).abs() < 1e-5);
		assert_frames_mirror(Vec3::new(0.0, 0.0, 100.0), Transform::IDENTITY, 30.0);
	}

	#[test]
	fn test_off_axis_view_frames_mirror() {
		assert_frames_mirror(Vec3::new(40.0, 20.0, 60.0), Transform::IDENTITY, 30.0);
		assert_frames_mirror(
			Vec3::new(-25.0, 90.0, 40.0),
			Transform::from_xyz(0.0, 35.0, -45.0),
			30.0,
		);
	}

	#[test]
	fn test_ground_mirror_frames_mirror() {
		let ground = Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2));
		assert_frames_mirror(Vec3::new(0.0, 75.0, 160.0), ground, 50.05);
		assert_frames_mirror(Vec3::new(30.0, 10.0, -20.0), ground, 50.05);
	}

	#[test]
	fn test_viewer_on_or_behind_plane_has_no_view() {
		let ground = Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2));
		assert!(reflection_view(Vec3::new(5.0, 0.0, 0.0), &ground, 10.0).is_none());
		assert!(reflection_view(Vec3::new(5.0, -3.0, 0.0), &ground, 10.0).is_none());
	}
}
