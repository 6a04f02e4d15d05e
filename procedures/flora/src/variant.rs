use crate::error::FloraError;
use bevy::prelude::*;
use std::{fmt, str::FromStr};

pub const PALETTE_LEN: usize = 11;

/// sRGB colors, `0xRRGGBB`, darkest first.
pub type Palette = [u32; PALETTE_LEN];

/// How a variant picks its colors from its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorIndex {
	/// One color per petal sector.
	BySector,
	/// One color per layer; every sector of a layer shares it.
	ByLayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantConfig {
	pub palette: Palette,
	/// Number of concentric lathes.
	pub layer_count: usize,
	/// Whether each layer is split into petal sectors.
	pub sectored: bool,
	pub color_index: ColorIndex,
	/// Default placement in the XY plane.
	pub offset: Vec2,
}

const PINK: VariantConfig = VariantConfig {
	palette: [
		0xed5e5e, 0xef7777, 0xf48686, 0xfc9797, 0xffadad, 0xffc1c1, 0xffd1d1, 0xffe2e2, 0xfff2f2,
		0xfff7f7, 0xffffff,
	],
	layer_count: 1,
	sectored: true,
	color_index: ColorIndex::ByLayer,
	offset: Vec2::new(-10.0, -10.0),
};

const BLUE: VariantConfig = VariantConfig {
	palette: [
		0x00aeff, 0x00cdff, 0x25d4ff, 0x43daff, 0x5edfff, 0x7de5ff, 0x94eaff, 0xa8eeff, 0xc3f1fc,
		0xd9f8ff, 0xffffff,
	],
	layer_count: 1,
	sectored: true,
	color_index: ColorIndex::BySector,
	offset: Vec2::ZERO,
};

const ORANGE: VariantConfig = VariantConfig {
	palette: [
		0xff8000, 0xff8b16, 0xff9326, 0xff9c38, 0xffa850, 0xffb265, 0xffbf80, 0xffcc9a, 0xffdbb7,
		0xfeeede, 0xffffff,
	],
	layer_count: 1,
	sectored: true,
	color_index: ColorIndex::ByLayer,
	offset: Vec2::ZERO,
};

const RED: VariantConfig = VariantConfig {
	palette: [
		0xff0000, 0xff1a1a, 0xff2c2c, 0xfe4a4a, 0xff6161, 0xfe7575, 0xfe8c8c, 0xffa1a1, 0xfeb7b7,
		0xfed4d4, 0xffffff,
	],
	layer_count: PALETTE_LEN,
	sectored: false,
	color_index: ColorIndex::ByLayer,
	offset: Vec2::ZERO,
};

/// The four flower color families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
	Pink,
	Blue,
	Orange,
	/// Full bloom: concentric whole lathes instead of petals.
	Red,
}

impl Variant {
	pub const ALL: [Variant; 4] = [Variant::Pink, Variant::Blue, Variant::Orange, Variant::Red];

	pub fn config(self) -> &'static VariantConfig {
		match self {
			Variant::Pink => &PINK,
			Variant::Blue => &BLUE,
			Variant::Orange => &ORANGE,
			Variant::Red => &RED,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Variant::Pink => "pink",
			Variant::Blue => "blue",
			Variant::Orange => "orange",
			Variant::Red => "red",
		}
	}
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Variant {
	type Err = FloraError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Variant::ALL
			.into_iter()
			.find(|variant| variant.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| FloraError::invalid("variant", s))
	}
}

/// Converts a `0xRRGGBB` palette entry into a Bevy color.
pub fn palette_color(hex: u32) -> Color {
	Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_red_is_unsectored() {
		for variant in Variant::ALL {
			let config = variant.config();
			assert_eq!(config.sectored, variant != Variant::Red);
			assert!(config.layer_count <= config.palette.len());
		}
		assert_eq!(Variant::Red.config().layer_count, 11);
	}

	#[test]
	fn test_parse_names() {
		assert_eq!("Blue".parse::<Variant>(), Ok(Variant::Blue));
		assert_eq!(" red ".parse::<Variant>(), Ok(Variant::Red));
		assert!(matches!(
			"violet".parse::<Variant>(),
			Err(FloraError::InvalidParameter { name: "variant", .. })
		));
		for variant in Variant::ALL {
			assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
		}
	}

	#[test]
	fn test_palette_color_channels() {
		let color = palette_color(0x00aeff).to_srgba();
		assert_eq!(color.red, 0.0);
		assert!((color.green - 0xae as f32 / 255.0).abs() < 1e-6);
		assert_eq!(color.blue, 1.0);
	}
}
