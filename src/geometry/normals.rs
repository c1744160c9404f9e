use glam::Vec3;

use super::mesh::Mesh;

pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

pub fn accumulate_face_normals(mesh: &Mesh) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; mesh.vertex_count()];

    for triangle in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle_positions(triangle);
        let normal = face_normal(v0, v1, v2);

        for &index in &mesh.triangles[triangle] {
            accum[index as usize] += normal;
        }
    }

    accum
}

/// Replaces `mesh.normals` with one unit normal per vertex.
///
/// Vertices with no adjacent triangle, or whose contributions cancel out,
/// get the zero vector.
pub fn compute_vertex_normals(mesh: &mut Mesh) {
    let normals = accumulate_face_normals(mesh)
        .into_iter()
        .map(Vec3::normalize_or_zero)
        .collect();
    mesh.normals = Some(normals);
}
