use crate::error::FloraError;
use std::fmt;

/// Fully closed petals.
pub const BLOOM_MIN: f32 = -10.0;
/// Fully open petals.
pub const BLOOM_MAX: f32 = 0.0;
/// Change applied by a single trigger.
pub const BLOOM_STEP: f32 = 0.5;

/// The animation scalar, always within [`BLOOM_MIN`], [`BLOOM_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bloom(f32);

impl Bloom {
	pub const CLOSED: Self = Self(BLOOM_MIN);
	pub const OPEN: Self = Self(BLOOM_MAX);

	pub fn new(value: f32) -> Result<Self, FloraError> {
		if !value.is_finite() || !(BLOOM_MIN..=BLOOM_MAX).contains(&value) {
			return Err(FloraError::invalid("bloom", value));
		}
		Ok(Self(value))
	}

	fn clamped(value: f32) -> Self {
		Self(value.clamp(BLOOM_MIN, BLOOM_MAX))
	}

	pub fn value(self) -> f32 {
		self.0
	}
}

impl Default for Bloom {
	fn default() -> Self {
		Self::CLOSED
	}
}

impl TryFrom<f32> for Bloom {
	type Error = FloraError;

	fn try_from(value: f32) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl fmt::Display for Bloom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:.1}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomTrigger {
	Increase,
	Decrease,
}

/// Steps the bloom scalar in response to discrete triggers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BloomController {
	bloom: Bloom,
}

impl BloomController {
	pub fn new(bloom: Bloom) -> Self {
		Self { bloom }
	}

	pub fn bloom(&self) -> Bloom {
		self.bloom
	}

	pub fn increase(&mut self) -> Bloom {
		self.bloom = Bloom::clamped(self.bloom.0 + BLOOM_STEP);
		self.bloom
	}

	pub fn decrease(&mut self) -> Bloom {
		self.bloom = Bloom::clamped(self.bloom.0 - BLOOM_STEP);
		self.bloom
	}

	pub fn apply(&mut self, trigger: BloomTrigger) -> Bloom {
		match trigger {
			BloomTrigger::Increase => self.increase(),
			BloomTrigger::Decrease => self.decrease(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_increase_clamps_at_open() {
		let mut controller = BloomController::default();
		assert_eq!(controller.bloom(), Bloom::CLOSED);

		for _ in 0..21 {
			controller.increase();
		}
		assert_eq!(controller.bloom(), Bloom::OPEN);

		controller.increase();
		assert_eq!(controller.bloom().value(), 0.0);
	}

	#[test]
	fn test_decrease_clamps_at_closed() {
		let mut controller = BloomController::new(Bloom::OPEN);
		for _ in 0..40 {
			controller.apply(BloomTrigger::Decrease);
		}
		assert_eq!(controller.bloom().value(), -10.0);
	}

	#[test]
	fn test_steps_are_exact() {
		let mut controller = BloomController::default();
		assert_eq!(controller.apply(BloomTrigger::Increase).value(), -9.5);
		assert_eq!(controller.apply(BloomTrigger::Increase).value(), -9.0);
		assert_eq!(controller.apply(BloomTrigger::Decrease).value(), -9.5);
	}

	#[test]
	fn test_out_of_domain_is_rejected() {
		assert!(Bloom::new(0.5).is_err());
		assert!(Bloom::new(-10.5).is_err());
		assert!(Bloom::new(f32::NAN).is_err());
		assert_eq!(
			Bloom::try_from(1.0),
			Err(FloraError::InvalidParameter { name: "bloom", value: "1".to_string() })
		);
		assert_eq!(Bloom::new(-3.5).map(Bloom::value), Ok(-3.5));
	}
}
