use glam::{Mat4, Vec2, Vec3};

use offview::ViewerConfig;

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 20.0;

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub zoom_speed: f32,
    home: Vec3,
}

impl Camera {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            position: config.camera_position,
            target: config.camera_target,
            up: Vec3::Y,

            fov: config.fov_degrees.to_radians(),
            aspect: config.width as f32 / config.height.max(1) as f32,
            near: config.near,
            far: config.far,

            zoom_speed: config.zoom_speed,
            home: config.camera_position,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_scroll(&mut self, delta: f32) {
        let dir = (self.position - self.target).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let distance = (self.distance() - delta * self.zoom_speed).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + dir * distance;
    }

    pub fn reset(&mut self) {
        self.position = self.home;
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}

pub struct ModelRotation {
    pub pitch: f32,
    pub yaw: f32,
    pub sensitivity: f32,
}

impl ModelRotation {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            sensitivity,
        }
    }

    pub fn process_drag(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity;
        self.pitch += delta.y * self.sensitivity;
    }

    pub fn reset(&mut self) {
        self.pitch = 0.0;
        self.yaw = 0.0;
    }

    /// Pitch is applied first, then yaw.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians()) * Mat4::from_rotation_x(self.pitch.to_radians())
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_pos: [f32; 3],
    pub _padding: f32,
    pub base_color: [f32; 4],
}

impl SceneUniform {
    pub fn new(camera: &Camera, model: Mat4, light_pos: Vec3, base_color: [f32; 4]) -> Self {
        Self {
            mvp: (camera.view_projection_matrix() * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            light_pos: light_pos.to_array(),
            _padding: 0.0,
            base_color,
        }
    }
}
