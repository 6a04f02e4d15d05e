pub mod beds;
pub mod frame;
pub mod garden;
pub mod mirror;
pub mod stage;

pub use beds::FlowerBeds;
pub use frame::{advance, FrameInput, GardenState, Planting, RegeneratePolicy, RenderCommand};
pub use garden::{tend_garden, FlowerPart, Garden};
pub use mirror::{update_mirror_cameras, Mirror, MirrorCamera, MirrorSpec, MirrorViewer};
pub use stage::{CommandStage, Stage};

pub use flora;

// Main exports for the engine
// Users should register:
// - Garden resource
// - FrameInput resource, written once per frame before tend_garden
// - MirrorViewer on the main camera, mirrors spawned with mirror::spawn_mirror
// - Then add tend_garden and update_mirror_cameras to their Update schedule
