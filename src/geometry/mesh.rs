use glam::Vec3;

use super::error::MeshError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Option<Vec<Vec3>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            normals: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangle_positions(&self, triangle: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[triangle];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();

        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        match &self.normals {
            Some(normals) if normals.len() != vertex_count => Err(MeshError::NormalCount {
                normals: normals.len(),
                vertex_count,
            }),
            _ => Ok(()),
        }
    }

    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_buffer(&self) -> Option<&[f32]> {
        self.normals.as_deref().map(bytemuck::cast_slice)
    }

    pub fn index_buffer(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
            normals: None,
        }
    }

    #[test]
    fn buffers_are_tightly_packed() {
        let mesh = triangle();
        assert_eq!(
            mesh.position_buffer(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.index_buffer(), &[0, 1, 2]);
        assert!(mesh.normal_buffer().is_none());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        assert!(mesh.validate().is_ok());
        mesh.triangles[0][2] = 3;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn validate_rejects_normal_count_mismatch() {
        let mut mesh = triangle();
        mesh.normals = Some(vec![Vec3::Z; 2]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::NormalCount {
                normals: 2,
                vertex_count: 3,
            })
        );
    }
}
