pub mod error;
pub mod mesh;
pub mod normalize;
pub mod normals;
pub mod off;

pub use error::{FormatError, MeshError, OffError, OffResult};
pub use mesh::Mesh;
pub use normalize::{Aabb, BoundsSeed, CanonicalFrame, normalize_mesh};
pub use normals::{accumulate_face_normals, compute_vertex_normals, face_normal};
pub use off::{OffDocument, open_off, read_off, read_off_str};
