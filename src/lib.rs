pub mod config;
pub mod geometry;
pub mod loader;
pub mod slot;

pub use config::ViewerConfig;
pub use geometry::{BoundsSeed, Mesh, OffError};
pub use loader::{LoadedMesh, is_off_path, load_into, load_mesh};
pub use slot::{MeshSlot, Release};
