use glam::Vec3;

use offview::{LoadedMesh, ViewerConfig};

pub struct MeshInfo {
    pub name: String,
    pub vertices: usize,
    pub triangles: usize,
    pub skipped_faces: usize,
    pub center: Vec3,
    pub scale: f32,
}

impl MeshInfo {
    pub fn from_loaded(loaded: &LoadedMesh) -> Self {
        Self {
            name: loaded.name.clone(),
            vertices: loaded.mesh.vertex_count(),
            triangles: loaded.mesh.triangle_count(),
            skipped_faces: loaded.skipped_faces,
            center: loaded.frame.center,
            scale: loaded.frame.scale,
        }
    }
}

pub struct ViewerState {
    pub show_panel: bool,
    pub vsync_enabled: bool,
    pub fps_cap_enabled: bool,
    pub fps_cap: u32,
    pub fps: f32,

    pub mesh_info: Option<MeshInfo>,
    pub last_error: Option<String>,
}

impl ViewerState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            show_panel: true,
            vsync_enabled: config.vsync,
            fps_cap_enabled: config.target_fps.is_some(),
            fps_cap: config.target_fps.unwrap_or(60),
            fps: 0.0,

            mesh_info: None,
            last_error: None,
        }
    }
}
