use crate::GardenConfig;
use bevy::math::Vec2;
use clap::Parser;
use engine::{Planting, RegeneratePolicy};
use flora::{Bloom, FloraError, Variant};

/// Parses `<variant>=<x>,<y>`.
fn parse_offset(s: &str) -> Result<(Variant, Vec2), FloraError> {
	let invalid = || FloraError::invalid("offset", s);

	let (variant, coordinates) = s.split_once('=').ok_or_else(invalid)?;
	let variant = variant.parse::<Variant>()?;
	let (x, y) = coordinates.split_once(',').ok_or_else(invalid)?;
	let x: f32 = x.trim().parse().map_err(|_| invalid())?;
	let y: f32 = y.trim().parse().map_err(|_| invalid())?;
	if !x.is_finite() || !y.is_finite() {
		return Err(invalid());
	}

	Ok((variant, Vec2::new(x, y)))
}

#[derive(Parser, Debug)]
#[command(name = "garden", about = "A blooming flower in a mirrored room. Hold U to open, J to close.")]
pub struct GardenArgs {
	/// Variant to plant (pink, blue, orange, red). Repeat to plant several.
	#[arg(long = "variant")]
	pub variants: Vec<Variant>,

	/// Moves a planted variant, as `<variant>=<x>,<y>` (e.g. `pink=-10,-10`).
	#[arg(long = "offset", value_parser = parse_offset)]
	pub offsets: Vec<(Variant, Vec2)>,

	/// Rebuild the flowers every frame instead of only when bloom changes.
	#[arg(long)]
	pub every_frame: bool,

	/// Initial bloom, between -10 (closed) and 0 (open).
	#[arg(long, allow_negative_numbers = true)]
	pub bloom: Option<f32>,

	/// Width and height of each mirror texture, in pixels.
	#[arg(long, default_value_t = 512)]
	pub mirror_resolution: u32,
}

impl GardenArgs {
	pub fn into_config(self) -> Result<GardenConfig, FloraError> {
		let defaults = GardenConfig::default();

		let mut plantings = if self.variants.is_empty() {
			defaults.plantings
		} else {
			let mut plantings: Vec<Planting> = Vec::new();
			for variant in self.variants {
				if !plantings.iter().any(|planting| planting.variant == variant) {
					plantings.push(Planting::new(variant));
				}
			}
			plantings
		};

		for (variant, offset) in self.offsets {
			let planting = plantings
				.iter_mut()
				.find(|planting| planting.variant == variant)
				.ok_or_else(|| FloraError::invalid("offset", format!("{variant} is not planted")))?;
			*planting = planting.with_offset(offset);
		}

		let bloom = self.bloom.map(Bloom::new).transpose()?.unwrap_or(defaults.bloom);

		if self.mirror_resolution == 0 {
			return Err(FloraError::invalid("mirror resolution", self.mirror_resolution));
		}

		Ok(GardenConfig {
			plantings,
			policy: if self.every_frame {
				RegeneratePolicy::EveryFrame
			} else {
				RegeneratePolicy::OnChange
			},
			bloom,
			mirror_resolution: self.mirror_resolution,
		})
	}
}
