use glam::Vec3;

use super::mesh::Mesh;

/// Diagonal lengths below this are treated as a single point and not scaled.
pub const DEGENERATE_EXTENT: f32 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundsSeed {
    #[default]
    FirstVertex,
    /// Seed from the origin, so the origin is always inside the box.
    Origin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3], seed: BoundsSeed) -> Option<Self> {
        let start = match seed {
            BoundsSeed::FirstVertex => *points.first()?,
            BoundsSeed::Origin => Vec3::ZERO,
        };

        Some(points.iter().fold(
            Self {
                min: start,
                max: start,
            },
            |aabb, &p| Self {
                min: aabb.min.min(p),
                max: aabb.max.max(p),
            },
        ))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalFrame {
    pub center: Vec3,
    pub scale: f32,
}

impl CanonicalFrame {
    pub const IDENTITY: Self = Self {
        center: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn from_bounds(bounds: &Aabb) -> Self {
        let diagonal = bounds.diagonal();
        let scale = if diagonal < DEGENERATE_EXTENT {
            1.0
        } else {
            diagonal.recip()
        };

        Self {
            center: bounds.center(),
            scale,
        }
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        (p - self.center) * self.scale
    }
}

/// Rewrites the mesh positions in place. Normals are left alone: a
/// translation plus a positive uniform scale does not change directions.
pub fn normalize_mesh(mesh: &mut Mesh, seed: BoundsSeed) -> CanonicalFrame {
    let Some(bounds) = Aabb::from_points(&mesh.positions, seed) else {
        return CanonicalFrame::IDENTITY;
    };

    let frame = CanonicalFrame::from_bounds(&bounds);
    for p in &mut mesh.positions {
        *p = frame.apply(*p);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_seed_folds_origin_into_bounds() {
        let points = [Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 2.0, 1.0)];

        let tight = Aabb::from_points(&points, BoundsSeed::FirstVertex).unwrap();
        assert_eq!(tight.min, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(tight.max, Vec3::new(3.0, 2.0, 1.0));

        let seeded = Aabb::from_points(&points, BoundsSeed::Origin).unwrap();
        assert_eq!(seeded.min, Vec3::ZERO);
        assert_eq!(seeded.max, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn empty_bounds() {
        assert!(Aabb::from_points(&[], BoundsSeed::FirstVertex).is_none());
        let origin = Aabb::from_points(&[], BoundsSeed::Origin).unwrap();
        assert_eq!(origin.diagonal(), 0.0);
    }
}
