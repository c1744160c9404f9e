pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{UiActions, draw_fps, draw_hint, draw_mesh_panel};
pub use state::{MeshInfo, ViewerState};
pub use theme::apply_theme;
