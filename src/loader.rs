use std::path::Path;

use log::info;

use crate::geometry::{
    BoundsSeed, CanonicalFrame, Mesh, OffDocument, OffResult, compute_vertex_normals,
    normalize_mesh, open_off,
};
use crate::slot::{MeshSlot, Release};

#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub name: String,
    pub mesh: Mesh,
    pub skipped_faces: usize,
    pub edge_count: usize,
    pub frame: CanonicalFrame,
}

pub fn is_off_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("off"))
}

/// Normals are computed on the original positions, then the mesh is moved
/// into the canonical frame.
pub fn prepare(document: OffDocument, name: String, seed: BoundsSeed) -> LoadedMesh {
    let OffDocument {
        mut mesh,
        skipped_faces,
        edge_count,
    } = document;

    compute_vertex_normals(&mut mesh);
    let frame = normalize_mesh(&mut mesh, seed);
    debug_assert_eq!(mesh.validate(), Ok(()));

    LoadedMesh {
        name,
        mesh,
        skipped_faces,
        edge_count,
        frame,
    }
}

pub fn load_mesh(path: &Path, seed: BoundsSeed) -> OffResult<LoadedMesh> {
    let document = open_off(path)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let loaded = prepare(document, name, seed);
    info!(
        "loaded {}: {} vertices, {} triangles, center {:?}, scale {}",
        loaded.name,
        loaded.mesh.vertex_count(),
        loaded.mesh.triangle_count(),
        loaded.frame.center,
        loaded.frame.scale,
    );
    Ok(loaded)
}

/// Loads `path` and moves the uploaded result into `slot`. On error `upload`
/// never runs and the slot keeps its current mesh.
pub fn load_into<T: Release>(
    slot: &mut MeshSlot<T>,
    path: &Path,
    seed: BoundsSeed,
    upload: impl FnOnce(&Mesh) -> T,
) -> OffResult<LoadedMesh> {
    let loaded = load_mesh(path, seed)?;
    slot.replace(upload(&loaded.mesh));
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_extension_filter() {
        assert!(is_off_path(Path::new("bunny.off")));
        assert!(is_off_path(Path::new("/models/CUBE.OFF")));
        assert!(!is_off_path(Path::new("bunny.obj")));
        assert!(!is_off_path(Path::new("off")));
        assert!(!is_off_path(Path::new("archive.off.gz")));
    }
}
