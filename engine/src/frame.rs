use bevy::prelude::*;
use flora::{Bloom, BloomController, BloomTrigger, Variant};

/// When the garden rebuilds its flowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegeneratePolicy {
	/// Rebuild only after bloom or the plantings changed.
	#[default]
	OnChange,
	/// Rebuild every frame regardless.
	EveryFrame,
}

/// A variant drawn by the garden, optionally moved off its default placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planting {
	pub variant: Variant,
	pub offset: Option<Vec2>,
}

impl Planting {
	pub fn new(variant: Variant) -> Self {
		Self { variant, offset: None }
	}

	pub fn with_offset(mut self, offset: Vec2) -> Self {
		self.offset = Some(offset);
		self
	}
}

/// Signals polled from the input devices once per frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
	pub increase: bool,
	pub decrease: bool,
	/// Plant the variant, or uproot it if it is already planted.
	pub toggle: Option<Variant>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
	Regenerate { variant: Variant, offset: Option<Vec2>, bloom: Bloom },
	Clear { variant: Variant },
}

/// Everything the frame loop carries from one frame to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenState {
	pub bloom: BloomController,
	pub plantings: Vec<Planting>,
	pub policy: RegeneratePolicy,
	/// Bloom the current shapes were built at, `None` when they are stale.
	drawn: Option<Bloom>,
}

impl GardenState {
	pub fn new(plantings: Vec<Planting>, policy: RegeneratePolicy) -> Self {
		Self { bloom: BloomController::default(), plantings, policy, drawn: None }
	}

	pub fn with_bloom(mut self, bloom: Bloom) -> Self {
		self.bloom = BloomController::new(bloom);
		self
	}

	pub fn drawn(&self) -> Option<Bloom> {
		self.drawn
	}

	pub fn is_planted(&self, variant: Variant) -> bool {
		self.plantings.iter().any(|planting| planting.variant == variant)
	}
}

impl Default for GardenState {
	fn default() -> Self {
		Self::new(vec![Planting::new(Variant::Blue)], RegeneratePolicy::default())
	}
}

/// Runs one frame: applies the input to the state and lists the scene changes it calls for.
pub fn advance(mut state: GardenState, input: FrameInput) -> (GardenState, Vec<RenderCommand>) {
	let mut commands = Vec::new();

	if let Some(variant) = input.toggle {
		if let Some(index) = state.plantings.iter().position(|p| p.variant == variant) {
			state.plantings.remove(index);
			commands.push(RenderCommand::Clear { variant });
		} else {
			state.plantings.push(Planting::new(variant));
			state.drawn = None;
		}
	}

	if input.increase {
		state.bloom.apply(BloomTrigger::Increase);
	}
	if input.decrease {
		state.bloom.apply(BloomTrigger::Decrease);
	}

	let bloom = state.bloom.bloom();
	if state.policy == RegeneratePolicy::EveryFrame || state.drawn != Some(bloom) {
		commands.extend(state.plantings.iter().map(|planting| RenderCommand::Regenerate {
			variant: planting.variant,
			offset: planting.offset,
			bloom,
		}));
		state.drawn = Some(bloom);
	}

	(state, commands)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn regenerated(commands: &[RenderCommand]) -> Vec<Variant> {
		commands
			.iter()
			.filter_map(|command| match command {
				RenderCommand::Regenerate { variant, .. } => Some(*variant),
				RenderCommand::Clear { .. } => None,
			})
			.collect()
	}

	#[test]
	fn test_first_frame_draws_every_planting() {
		let state = GardenState::new(
			vec![Planting::new(Variant::Blue), Planting::new(Variant::Red)],
			RegeneratePolicy::OnChange,
		);
		let (state, commands) = advance(state, FrameInput::default());

		assert_eq!(regenerated(&commands), vec![Variant::Blue, Variant::Red]);
		assert_eq!(state.drawn(), Some(Bloom::CLOSED));
	}

	#[test]
	fn test_idle_frame_is_quiet_on_change() {
		let (state, _) = advance(GardenState::default(), FrameInput::default());
		let (_, commands) = advance(state, FrameInput::default());
		assert!(commands.is_empty());
	}

	#[test]
	fn test_idle_frame_rebuilds_every_frame() {
		let state = GardenState::new(
			vec![Planting::new(Variant::Pink), Planting::new(Variant::Orange)],
			RegeneratePolicy::EveryFrame,
		);
		let (state, _) = advance(state, FrameInput::default());
		let (_, commands) = advance(state, FrameInput::default());
		assert_eq!(regenerated(&commands), vec![Variant::Pink, Variant::Orange]);
	}

	#[test]
	fn test_held_key_steps_and_clamps() {
		let mut state = GardenState::default();
		let increase = FrameInput { increase: true, ..default() };

		let (next, commands) = advance(state, increase);
		state = next;
		assert_eq!(commands, vec![RenderCommand::Regenerate {
			variant: Variant::Blue,
			offset: None,
			bloom: Bloom::new(-9.5).unwrap(),
		}]);

		for _ in 0..30 {
			state = advance(state, increase).0;
		}
		assert_eq!(state.bloom.bloom(), Bloom::OPEN);

		// clamped, so nothing changed
		let (state, commands) = advance(state, increase);
		assert!(commands.is_empty());

		let decrease = FrameInput { decrease: true, ..default() };
		let mut state = state;
		for _ in 0..30 {
			state = advance(state, decrease).0;
		}
		assert_eq!(state.bloom.bloom(), Bloom::CLOSED);
	}

	#[test]
	fn test_both_keys_cancel_out() {
		let state = GardenState::default().with_bloom(Bloom::new(-5.0).unwrap());
		let (state, _) = advance(state, FrameInput::default());
		let (state, commands) =
			advance(state, FrameInput { increase: true, decrease: true, toggle: None });
		assert_eq!(state.bloom.bloom().value(), -5.0);
		assert!(commands.is_empty());
	}

	#[test]
	fn test_toggle_plants_and_uproots() {
		let (state, _) = advance(GardenState::default(), FrameInput::default());

		let (state, commands) =
			advance(state, FrameInput { toggle: Some(Variant::Red), ..default() });
		assert!(state.is_planted(Variant::Red));
		assert_eq!(regenerated(&commands), vec![Variant::Blue, Variant::Red]);

		let (state, commands) =
			advance(state, FrameInput { toggle: Some(Variant::Blue), ..default() });
		assert!(!state.is_planted(Variant::Blue));
		assert_eq!(commands, vec![RenderCommand::Clear { variant: Variant::Blue }]);
	}
}
