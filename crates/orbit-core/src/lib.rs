pub mod constants;
pub mod controller;
pub mod error;
pub mod particles;
pub mod scene;
pub mod spectrum;
pub mod state;
pub mod triggers;

pub use constants::*;
pub use controller::*;
pub use error::*;
pub use particles::*;
pub use scene::*;
pub use spectrum::*;
pub use state::*;
pub use triggers::*;
