use crate::{
	bloom::Bloom,
	error::FloraError,
	lathe::{LatheBuilder, DEFAULT_SEGMENTS},
	profile::PetalProfile,
	variant::{palette_color, ColorIndex, Variant},
};
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Petals per layer of a sectored variant.
pub const PETAL_COUNT: usize = 8;
/// Angle allotted to each petal.
pub const SECTOR_PITCH: f32 = TAU / PETAL_COUNT as f32;
/// Unfilled angle left after each petal.
pub const PETAL_GAP: f32 = PI / 15.0;

/// Angular wedge of a lathe around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
	pub index: usize,
	pub start: f32,
	pub length: f32,
}

impl Sector {
	pub fn full() -> Self {
		Self { index: 0, start: 0.0, length: TAU }
	}

	pub fn petal(index: usize) -> Self {
		Self { index, start: index as f32 * SECTOR_PITCH, length: SECTOR_PITCH - PETAL_GAP }
	}

	pub fn end(&self) -> f32 {
		self.start + self.length
	}
}

/// One renderable revolved shape produced for a flower.
#[derive(Debug, Clone)]
pub struct Solid {
	pub variant: Variant,
	pub layer: usize,
	pub sector: Sector,
	/// `0xRRGGBB` palette entry.
	pub color: u32,
	pub offset: Vec2,
	pub lathe: LatheBuilder,
}

impl Solid {
	pub fn color(&self) -> Color {
		palette_color(self.color)
	}

	pub fn transform(&self) -> Transform {
		Transform::from_xyz(self.offset.x, self.offset.y, 0.0)
	}
}

/// Builds the solids of one flower variant.
#[derive(Debug, Clone)]
pub struct FlowerBuilder {
	pub variant: Variant,
	pub offset: Vec2,
	pub segments: u32,
}

impl FlowerBuilder {
	pub fn new(variant: Variant) -> Self {
		Self { variant, offset: variant.config().offset, segments: DEFAULT_SEGMENTS }
	}

	pub fn with_offset(mut self, offset: Option<Vec2>) -> Self {
		if let Some(offset) = offset {
			self.offset = offset;
		}
		self
	}

	pub fn with_segments(mut self, segments: u32) -> Self {
		self.segments = segments;
		self
	}

	pub fn build(&self, bloom: Bloom) -> Vec<Solid> {
		let config = self.variant.config();
		let mut solids = Vec::new();

		for layer in 0..config.layer_count {
			let profile = PetalProfile::new(bloom, layer).into_points();

			let sectors: Vec<Sector> = if config.sectored {
				(0..PETAL_COUNT).map(Sector::petal).collect()
			} else {
				vec![Sector::full()]
			};

			for sector in sectors {
				let color = match config.color_index {
					ColorIndex::BySector => config.palette[sector.index],
					ColorIndex::ByLayer => config.palette[layer],
				};

				let lathe = LatheBuilder::new(profile.clone())
					.with_segments(self.segments)
					.with_sweep(sector.start, sector.length);

				solids.push(Solid {
					variant: self.variant,
					layer,
					sector,
					color,
					offset: self.offset,
					lathe,
				});
			}
		}

		log::debug!("Built {} solids for {} at bloom {}", solids.len(), self.variant, bloom);
		solids
	}
}

/// Generates the solids of `variant` at `bloom`, optionally overriding its placement.
pub fn generate(
	bloom: f32,
	variant: Variant,
	offset: Option<Vec2>,
) -> Result<Vec<Solid>, FloraError> {
	let bloom = Bloom::new(bloom)?;
	Ok(FlowerBuilder::new(variant).with_offset(offset).build(bloom))
}
