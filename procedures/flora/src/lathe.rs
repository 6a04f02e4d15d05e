use bevy::prelude::*;
use render_item::{IdentifiedMesh, MeshBuilder, MeshId};
use std::f32::consts::TAU;

/// Radial segments used when none are given.
pub const DEFAULT_SEGMENTS: u32 = 12;

/// Revolves a 2D profile `(radius, height)` around the Y axis.
///
/// A point at angle `phi` lands at `(r * sin(phi), h, r * cos(phi))`, so `phi = 0` faces +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct LatheBuilder {
	points: Vec<Vec2>,
	segments: u32,
	phi_start: f32,
	phi_length: f32,
}

impl LatheBuilder {
	pub fn new(points: Vec<Vec2>) -> Self {
		Self { points, segments: DEFAULT_SEGMENTS, phi_start: 0.0, phi_length: TAU }
	}

	pub fn with_segments(mut self, segments: u32) -> Self {
		self.segments = segments;
		self
	}

	pub fn with_sweep(mut self, phi_start: f32, phi_length: f32) -> Self {
		self.phi_start = phi_start;
		self.phi_length = phi_length;
		self
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	pub fn segments(&self) -> u32 {
		self.segments
	}

	pub fn phi_start(&self) -> f32 {
		self.phi_start
	}

	pub fn phi_length(&self) -> f32 {
		self.phi_length
	}

	/// Normals of the profile curve in the (radius, height) plane.
	fn profile_normals(&self) -> Vec<Vec2> {
		let last = self.points.len() - 1;
		(0..self.points.len())
			.map(|i| {
				let tangent = self.points[(i + 1).min(last)] - self.points[i.saturating_sub(1)];
				Vec2::new(tangent.y, -tangent.x).normalize_or_zero()
			})
			.collect()
	}
}

impl MeshBuilder for LatheBuilder {
	fn build_mesh(&self) -> Option<Mesh> {
		if self.points.len() < 2 || self.segments == 0 {
			return None;
		}

		let rows = self.points.len();
		let columns = self.segments as usize + 1;
		let profile_normals = self.profile_normals();

		let mut positions = Vec::with_capacity(rows * columns);
		let mut normals = Vec::with_capacity(rows * columns);
		let mut uvs = Vec::with_capacity(rows * columns);

		for segment in 0..columns {
			let u = segment as f32 / self.segments as f32;
			let (sin, cos) = (self.phi_start + u * self.phi_length).sin_cos();

			for (row, (point, normal)) in self.points.iter().zip(&profile_normals).enumerate() {
				positions.push([point.x * sin, point.y, point.x * cos]);
				normals.push([normal.x * sin, normal.y, normal.x * cos]);
				uvs.push([u, row as f32 / (rows - 1) as f32]);
			}
		}

		let mut indices = Vec::with_capacity(self.segments as usize * (rows - 1) * 6);
		for segment in 0..self.segments as usize {
			for row in 0..rows - 1 {
				let a = (segment * rows + row) as u32;
				let b = a + rows as u32;
				let c = b + 1;
				let d = a + 1;
				indices.extend_from_slice(&[a, b, d, c, d, b]);
			}
		}

		let mut mesh = Mesh::new(
			bevy::mesh::PrimitiveTopology::TriangleList,
			bevy::asset::RenderAssetUsages::RENDER_WORLD,
		);
		mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
		mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
		mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
		mesh.insert_indices(bevy::mesh::Indices::U32(indices));
		Some(mesh)
	}
}

impl IdentifiedMesh for LatheBuilder {
	fn id(&self) -> MeshId {
		let debug_string = format!("{:?}", self);
		MeshId::new(debug_string)
	}
}
