use crate::bloom::Bloom;
use bevy::prelude::*;

/// Points sampled along the petal curve.
pub const PROFILE_SAMPLES: usize = 10;
/// Curl of the outermost layer; each inner layer curls one unit less.
pub const PROFILE_AMPLITUDE: f32 = 10.0;

const SAMPLE_STEP: f32 = 0.2;
const BASE_RADIUS: f32 = 5.0;
const HEIGHT_STEP: f32 = 2.0;

/// Lathe cross-section of one petal layer: `(radius, height)` pairs, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct PetalProfile {
	points: Vec<Vec2>,
}

impl PetalProfile {
	pub fn new(bloom: Bloom, layer: usize) -> Self {
		let points = (0..PROFILE_SAMPLES)
			.map(|sample| Vec2::new(Self::radius(bloom, layer, sample), Self::height(sample)))
			.collect();
		Self { points }
	}

	pub fn radius(bloom: Bloom, layer: usize, sample: usize) -> f32 {
		(sample as f32 * SAMPLE_STEP).sin() * (PROFILE_AMPLITUDE - layer as f32)
			+ BASE_RADIUS
			+ bloom.value()
	}

	pub fn height(sample: usize) -> f32 {
		(sample + 1) as f32 * HEIGHT_STEP
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	pub fn into_points(self) -> Vec<Vec2> {
		self.points
	}
}
