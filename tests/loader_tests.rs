use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec3;
use offview::geometry::FormatError;
use offview::{BoundsSeed, MeshSlot, OffError, Release, is_off_path, load_into, load_mesh};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("offview-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const CUBE_WITH_QUADS: &str = "OFF
8 8 0
1 1 1
3 1 1
3 3 1
1 3 1
1 1 3
3 1 3
3 3 3
1 3 3
3 0 2 1
3 0 3 2
3 4 5 6
3 4 6 7
4 0 1 5 4
4 1 2 6 5
4 2 3 7 6
4 3 0 4 7
";

#[test]
fn load_runs_full_pipeline() {
    let path = write_temp("cube.off", CUBE_WITH_QUADS);
    let loaded = load_mesh(&path, BoundsSeed::FirstVertex).unwrap();

    assert_eq!(loaded.name, "cube.off");
    assert_eq!(loaded.mesh.vertex_count(), 8);
    assert_eq!(loaded.mesh.triangle_count(), 4);
    assert_eq!(loaded.skipped_faces, 4);
    assert!(loaded.mesh.validate().is_ok());

    let normals = loaded.mesh.normal_buffer().unwrap();
    assert_eq!(normals.len(), loaded.mesh.position_buffer().len());

    assert!(loaded.frame.center.abs_diff_eq(Vec3::splat(2.0), 1e-5));
    assert!((loaded.frame.scale - 1.0 / 12.0f32.sqrt()).abs() < 1e-5);

    let half = 0.5 / 3.0f32.sqrt();
    for p in &loaded.mesh.positions {
        assert!(p.abs().abs_diff_eq(Vec3::splat(half), 1e-5), "got {p}");
    }
}

#[test]
fn bottom_face_normal_points_down() {
    let path = write_temp("bottom.off", CUBE_WITH_QUADS);
    let loaded = load_mesh(&path, BoundsSeed::FirstVertex).unwrap();
    let normals = loaded.mesh.normals.unwrap();

    // vertex 1 only touches the z = 1 face (0 2 1)
    assert!(normals[1].abs_diff_eq(Vec3::NEG_Z, 1e-5));
    // vertex 5 only touches the z = 3 face (4 5 6)
    assert!(normals[5].abs_diff_eq(Vec3::Z, 1e-5));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("offview-does-not-exist.off");
    let err = load_mesh(&path, BoundsSeed::FirstVertex).unwrap_err();
    assert!(err.is_io());
    assert!(matches!(err, OffError::Open { .. }));
}

#[test]
fn bad_header_is_not_an_io_error() {
    let path = write_temp("header.off", "PLY\n0 0 0\n");
    let err = load_mesh(&path, BoundsSeed::FirstVertex).unwrap_err();
    assert!(!err.is_io());
    assert!(matches!(
        err,
        OffError::Format {
            line: 1,
            error: FormatError::MissingHeader
        }
    ));
}

#[test]
fn extension_filter() {
    assert!(is_off_path(Path::new("mesh.off")));
    assert!(is_off_path(Path::new("mesh.Off")));
    assert!(!is_off_path(Path::new("mesh.obj")));
    assert!(!is_off_path(Path::new("mesh")));
}

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

struct FakeMesh {
    name: &'static str,
    journal: Journal,
}

impl FakeMesh {
    fn new(name: &'static str, journal: &Journal) -> Self {
        journal.0.borrow_mut().push(format!("upload {name}"));
        Self {
            name,
            journal: journal.clone(),
        }
    }
}

impl Release for FakeMesh {
    fn release(self) {
        self.journal.0.borrow_mut().push(format!("release {}", self.name));
    }
}

#[test]
fn replace_releases_previous_mesh() {
    let journal = Journal::default();
    let mut slot = MeshSlot::new();
    assert!(!slot.is_loaded());

    slot.replace(FakeMesh::new("a", &journal));
    assert_eq!(slot.get().map(|m| m.name), Some("a"));

    slot.replace(FakeMesh::new("b", &journal));
    assert_eq!(slot.get().map(|m| m.name), Some("b"));

    assert_eq!(
        journal.entries(),
        vec!["upload a", "upload b", "release a"]
    );
}

#[test]
fn failed_load_leaves_slot_untouched() {
    let journal = Journal::default();
    let mut slot = MeshSlot::new();
    slot.replace(FakeMesh::new("current", &journal));

    let path = write_temp("broken.off", "OFF\n3 1 0\n0 0 0\n1 0\n");
    let result = load_into(&mut slot, &path, BoundsSeed::FirstVertex, |_| {
        FakeMesh::new("broken", &journal)
    });

    assert!(result.is_err());
    assert_eq!(slot.get().map(|m| m.name), Some("current"));
    assert_eq!(journal.entries(), vec!["upload current"]);
}

#[test]
fn missing_file_leaves_slot_untouched() {
    let journal = Journal::default();
    let mut slot = MeshSlot::new();
    slot.replace(FakeMesh::new("current", &journal));

    let path = std::env::temp_dir().join("offview-missing-slot.off");
    let err = load_into(&mut slot, &path, BoundsSeed::FirstVertex, |_| {
        FakeMesh::new("missing", &journal)
    })
    .unwrap_err();

    assert!(err.is_io());
    assert_eq!(slot.get().map(|m| m.name), Some("current"));
}

#[test]
fn successful_load_swaps_slot() {
    let journal = Journal::default();
    let mut slot = MeshSlot::new();
    slot.replace(FakeMesh::new("current", &journal));

    let path = write_temp("swap.off", CUBE_WITH_QUADS);
    let loaded = load_into(&mut slot, &path, BoundsSeed::FirstVertex, |mesh| {
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.normals.is_some());
        FakeMesh::new("cube", &journal)
    })
    .unwrap();

    assert_eq!(loaded.name, "swap.off");
    assert_eq!(slot.get().map(|m| m.name), Some("cube"));
    assert_eq!(
        journal.entries(),
        vec!["upload current", "upload cube", "release current"]
    );
}

#[test]
fn dropping_slot_releases_mesh() {
    let journal = Journal::default();
    {
        let mut slot = MeshSlot::new();
        slot.replace(FakeMesh::new("only", &journal));
    }
    assert_eq!(journal.entries(), vec!["upload only", "release only"]);
}

#[test]
fn clear_empties_slot() {
    let journal = Journal::default();
    let mut slot = MeshSlot::new();
    slot.replace(FakeMesh::new("x", &journal));
    slot.clear();
    assert!(!slot.is_loaded());
    slot.clear();
    assert_eq!(journal.entries(), vec!["upload x", "release x"]);
}
