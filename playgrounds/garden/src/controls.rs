use bevy::prelude::*;
use engine::FrameInput;
use flora::Variant;

/// Keys that plant or uproot a variant, in `Variant::ALL` order.
const TOGGLE_KEYS: [(KeyCode, Variant); 4] = [
	(KeyCode::Digit1, Variant::Pink),
	(KeyCode::Digit2, Variant::Blue),
	(KeyCode::Digit3, Variant::Orange),
	(KeyCode::Digit4, Variant::Red),
];

/// Samples the keyboard once per frame into `FrameInput`.
pub fn poll_keys(keyboard_input: Res<ButtonInput<KeyCode>>, mut input: ResMut<FrameInput>) {
	let toggle = TOGGLE_KEYS
		.iter()
		.find(|(key, _)| keyboard_input.just_pressed(*key))
		.map(|(_, variant)| *variant);

	if let Some(variant) = toggle {
		log::info!("Toggling {variant}");
	}

	*input = FrameInput {
		increase: keyboard_input.pressed(KeyCode::KeyU),
		decrease: keyboard_input.pressed(KeyCode::KeyJ),
		toggle,
	};
}
