/// Tangent and bitangent estimation for normal mapping
use nalgebra::{Matrix3, Point2, Point3, Vector3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::geometry::{IndexedAttribute, Mesh, Triangle, POSITIONS, TEXCOORDS};

/// What to do with a face whose texture coordinates span no area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UvDegeneracy {
    /// Leave the face out of the accumulation
    #[default]
    Skip,
    /// Abort with `MeshError::DegenerateTexcoords`
    Fail,
}

/// Per-position tangent frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TangentFrames {
    pub tangents: Vec<Vector3<f32>>,
    pub bitangents: Vec<Vector3<f32>>,
    /// Faces left out because their texture coordinates were degenerate
    pub skipped_faces: usize,
}

/// Tangent and bitangent directions of one face.
///
/// Solves `M = V * U^-1` where `V` holds the object-space edges and normal
/// and `U` the texture-space edges and normal; the first two columns of `M`
/// are the tangent and bitangent. Returns `None` when `U` is singular.
pub fn face_tangent_frame(
    positions: [&Point3<f32>; 3],
    texcoords: [&Point2<f32>; 3],
) -> Option<(Vector3<f32>, Vector3<f32>)> {
    let [a, b, c] = positions;
    let [ta, tb, tc] = texcoords;

    let v1 = b - a;
    let v2 = c - a;
    let u1 = (tb - ta).push(0.0);
    let u2 = (tc - ta).push(0.0);

    let n_texture = u1.cross(&u2).try_normalize(0.0)?;
    // Only scales the third column of U^-1, which is zero in its first two rows.
    let n_object = v1.cross(&v2).try_normalize(0.0).unwrap_or_else(Vector3::zeros);

    let u = Matrix3::from_columns(&[u1, u2, n_texture]);
    let v = Matrix3::from_columns(&[v1, v2, n_object]);
    let m = v * u.try_inverse()?;
    if !m.iter().all(|x| x.is_finite()) {
        return None;
    }

    Some((m.column(0).into_owned(), m.column(1).into_owned()))
}

/// Accumulate face frames into their corner positions and normalize.
///
/// Callers must have checked that both face lists have the same length and
/// that every index is in bounds.
pub fn tangent_frames(
    positions: &[Point3<f32>],
    position_faces: &[Triangle],
    texcoords: &[Point2<f32>],
    texcoord_faces: &[Triangle],
    policy: UvDegeneracy,
) -> MeshResult<TangentFrames> {
    let mut frames = TangentFrames {
        tangents: vec![Vector3::zeros(); positions.len()],
        bitangents: vec![Vector3::zeros(); positions.len()],
        skipped_faces: 0,
    };

    for (face, (p, t)) in position_faces.iter().zip(texcoord_faces).enumerate() {
        let [a, b, c] = p.indices;
        let [ta, tb, tc] = t.indices;
        let frame = face_tangent_frame(
            [&positions[a], &positions[b], &positions[c]],
            [&texcoords[ta], &texcoords[tb], &texcoords[tc]],
        );

        let Some((tangent, bitangent)) = frame else {
            match policy {
                UvDegeneracy::Skip => {
                    debug!(face, "Skipping face with degenerate texture coordinates");
                    frames.skipped_faces += 1;
                    continue;
                }
                UvDegeneracy::Fail => return Err(MeshError::DegenerateTexcoords { face }),
            }
        };

        for i in p.indices {
            frames.tangents[i] += tangent;
            frames.bitangents[i] += bitangent;
        }
    }

    for v in frames.tangents.iter_mut().chain(frames.bitangents.iter_mut()) {
        *v = v.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
    }
    Ok(frames)
}

impl Mesh {
    /// Recompute tangents and bitangents, skipping faces with degenerate
    /// texture coordinates. Returns the number of faces skipped.
    pub fn compute_tangent_frames(&mut self) -> MeshResult<usize> {
        self.compute_tangent_frames_with(UvDegeneracy::default())
    }

    /// Recompute `tangents` and `bitangents`, one per position.
    ///
    /// Needs texture coordinates for every face. On any error the previous
    /// tangents and bitangents are kept as they were.
    pub fn compute_tangent_frames_with(&mut self, policy: UvDegeneracy) -> MeshResult<usize> {
        if self.texcoords.is_empty() {
            return Err(MeshError::MissingTexcoords);
        }
        if self.texcoords.face_count() != self.face_count() {
            return Err(MeshError::FaceCountMismatch {
                attribute: TEXCOORDS,
                faces: self.texcoords.face_count(),
                expected: self.face_count(),
            });
        }
        self.positions.check_indices(POSITIONS)?;
        self.texcoords.check_indices(TEXCOORDS)?;

        let frames = tangent_frames(
            &self.positions.values,
            &self.positions.faces,
            &self.texcoords.values,
            &self.texcoords.faces,
            policy,
        )?;

        self.tangents = IndexedAttribute {
            values: frames.tangents,
            faces: self.positions.faces.clone(),
        };
        self.bitangents = frames.bitangents;

        debug!(
            tangents = self.tangents.len(),
            skipped = frames.skipped_faces,
            "Computed tangent frames"
        );
        Ok(frames.skipped_faces)
    }
}
