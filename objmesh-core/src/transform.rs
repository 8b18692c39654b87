/// Affine transforms: builders, the normalizing transform, and application to a mesh
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::geometry::Mesh;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from angles around X, Y and Z (in radians)
    pub fn rotation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, z));

        // Apply rotations in order: X, Y, Z
        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    pub fn uniform_scale_matrix(s: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(s)
    }

    /// Inverse-transpose of the upper-left 3x3 block, which maps normals so
    /// they stay perpendicular to transformed surfaces. `None` if singular.
    pub fn normal_matrix(transform: &Matrix4<f32>) -> Option<Matrix3<f32>> {
        transform
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|inverse| inverse.transpose())
    }
}

impl Mesh {
    /// Transform that centers the bounding box at the origin and scales its
    /// largest side to length 2.
    ///
    /// Translation happens first, then the uniform scale. Returns the
    /// identity for a mesh without positions, and translates only when the
    /// box has no extent.
    pub fn normalizing_transformation(&self) -> Matrix4<f32> {
        let Some(aabb) = self.bounding_box() else {
            return Matrix4::identity();
        };

        let center = aabb.center();
        let extent = aabb.max_extent();
        let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };

        Transform::uniform_scale_matrix(scale)
            * Transform::translation_matrix(-center.x, -center.y, -center.z)
    }

    /// Apply an affine transform to positions, and its inverse-transpose to
    /// normals (renormalized). Tangent frames are left alone.
    ///
    /// Positions are multiplied as `(x, y, z, 1)` and the first three
    /// components kept; there is no division by `w`.
    ///
    /// Fails without changing anything if the mesh has normals and the
    /// transform's linear part is singular.
    pub fn apply_transformation(&mut self, transform: &Matrix4<f32>) -> MeshResult<()> {
        let normal_matrix = if self.normals.is_empty() {
            Matrix3::identity()
        } else {
            Transform::normal_matrix(transform).ok_or(MeshError::SingularTransform)?
        };

        for p in &mut self.positions.values {
            *p = Point3::from((transform * p.to_homogeneous()).xyz());
        }
        for n in &mut self.normals.values {
            *n = (normal_matrix * *n)
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros);
        }

        debug!(
            positions = self.positions.len(),
            normals = self.normals.len(),
            "Applied transformation"
        );
        Ok(())
    }
}
