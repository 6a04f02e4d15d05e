pub mod bloom;
pub mod error;
pub mod flower;
pub mod lathe;
pub mod profile;
pub mod variant;

pub use bloom::{Bloom, BloomController, BloomTrigger};
pub use error::FloraError;
pub use flower::{generate, FlowerBuilder, Sector, Solid};
pub use lathe::LatheBuilder;
pub use profile::PetalProfile;
pub use variant::{ColorIndex, Variant, VariantConfig};
