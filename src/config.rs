use glam::Vec3;

use crate::geometry::BoundsSeed;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub target_fps: Option<u32>,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    pub rotation_sensitivity: f32,
    pub zoom_speed: f32,

    pub light_position: Vec3,
    pub base_color: [f32; 4],
    pub clear_color: [f64; 3],

    pub bounds_seed: BoundsSeed,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "OFF Mesh Viewer".to_string(),
            width: 1280,
            height: 720,
            vsync: false,
            target_fps: Some(60),

            camera_position: Vec3::new(0.0, 0.0, 3.0),
            camera_target: Vec3::ZERO,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,

            rotation_sensitivity: 0.4,
            zoom_speed: 0.25,

            light_position: Vec3::new(5.0, 5.0, 5.0),
            base_color: [200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0],
            clear_color: [245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0],

            bounds_seed: BoundsSeed::FirstVertex,
        }
    }
}
