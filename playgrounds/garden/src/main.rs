use bevy::prelude::*;
use clap::{error::ErrorKind, CommandFactory, Parser};
use garden_playground::{cli::GardenArgs, GardenPlugin};

fn main() {
	let args = GardenArgs::parse();
	let config = match args.into_config() {
		Ok(config) => config,
		Err(e) => GardenArgs::command().error(ErrorKind::InvalidValue, e).exit(),
	};

	println!("Starting flower garden with {}", config.describe());

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Flower Garden".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(GardenPlugin { config })
		.run();
}
