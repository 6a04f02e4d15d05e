use bevy::prelude::*;
use engine::Garden;
use flora::Variant;

#[derive(Component)]
pub struct BloomDisplay;

pub fn setup_bloom_ui(mut commands: Commands) {
	log::info!("Setting up bloom UI");

	commands
		.spawn((
			Node {
				position_type: PositionType::Absolute,
				top: Val::Px(10.0),
				left: Val::Px(10.0),
				padding: UiRect::all(Val::Px(10.0)),
				..default()
			},
			BackgroundColor(Color::hsla(201.0, 0.69, 0.62, 0.7)),
			BloomDisplay,
		))
		.with_children(|parent| {
			parent.spawn((
				Text::new(""),
				TextFont { font_size: 20.0, ..default() },
				TextColor(Color::WHITE),
			));
		});
}

fn bloom_text(garden: &Garden) -> String {
	let state = garden.state();
	let planted: Vec<String> = Variant::ALL
		.iter()
		.filter(|variant| state.is_planted(**variant))
		.map(|variant| format!("{variant} ({})", garden.beds().count(*variant)))
		.collect();

	format!(
		"Bloom: {}\nPlanted: {}\nMeshes: {}\nU/J: open/close  1-4: pink, blue, orange, red",
		state.bloom.bloom(),
		if planted.is_empty() { "nothing".to_string() } else { planted.join(", ") },
		garden.cached_meshes(),
	)
}

pub fn update_bloom_display(
	garden: Res<Garden>,
	mut text_query: Query<&mut Text>,
	display_query: Query<&Children, With<BloomDisplay>>,
) {
	if !garden.is_changed() {
		return;
	}

	let Ok(children) = display_query.single() else {
		return;
	};
	if let Some(&text_entity) = children.first() {
		if let Ok(mut text) = text_query.get_mut(text_entity) {
			text.0 = bloom_text(&garden);
		}
	}
}
