/// Per-vertex normal estimation from face geometry
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::MeshResult;
use crate::geometry::{IndexedAttribute, Mesh, Triangle, POSITIONS};

/// How much each face contributes to the normals of its corners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalWeighting {
    /// Every incident face counts equally
    #[default]
    Unweighted,
    /// Faces count in proportion to their area
    AreaWeighted,
}

/// Normal of triangle (a, b, c) from `(a - c) x (b - c)`.
///
/// Unweighted normals are unit length; a zero-area triangle yields NaN.
pub fn face_normal(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
    weighting: NormalWeighting,
) -> Vector3<f32> {
    let n = (a - c).cross(&(b - c));
    match weighting {
        NormalWeighting::Unweighted => n.normalize(),
        NormalWeighting::AreaWeighted => n,
    }
}

/// Sum face normals into their corners and normalize, one normal per position.
///
/// Callers must have checked that every face index is in bounds. Positions
/// without an incident face get a zero vector.
pub fn vertex_normals(
    positions: &[Point3<f32>],
    faces: &[Triangle],
    weighting: NormalWeighting,
) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for triangle in faces {
        let [a, b, c] = triangle.indices;
        let n = face_normal(&positions[a], &positions[b], &positions[c], weighting);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }

    for n in &mut normals {
        *n = n.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
    }
    normals
}

impl Mesh {
    /// Recompute `normals` from positions alone, with unweighted face normals.
    pub fn compute_normals(&mut self) -> MeshResult<()> {
        self.compute_normals_with(NormalWeighting::default())
    }

    /// Recompute `normals` so they share the position index space.
    ///
    /// Prior normals are discarded. If a position face index is out of
    /// bounds the mesh is left untouched.
    pub fn compute_normals_with(&mut self, weighting: NormalWeighting) -> MeshResult<()> {
        self.positions.check_indices(POSITIONS)?;

        let values = vertex_normals(&self.positions.values, &self.positions.faces, weighting);
        self.normals = IndexedAttribute {
            values,
            faces: self.positions.faces.clone(),
        };

        debug!(
            normals = self.normals.len(),
            ?weighting,
            "Computed vertex normals"
        );
        Ok(())
    }
}
