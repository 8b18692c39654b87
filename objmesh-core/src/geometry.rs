/// Indexed mesh storage: attribute streams, their triangle lists, and the mesh aggregate
use nalgebra::{Point2, Point3, Vector3};

use crate::error::{MeshError, MeshResult};

/// A triangle of three indices into one attribute stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            indices: [a, b, c],
        }
    }
}

impl From<[usize; 3]> for Triangle {
    fn from(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// An attribute array together with the triangles that index into it.
///
/// Positions, normals and texture coordinates each live in their own
/// stream with an independent index space. The `faces` list of a stream
/// is either empty (attribute absent) or as long as the position faces.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedAttribute<T> {
    pub values: Vec<T>,
    pub faces: Vec<Triangle>,
}

impl<T> IndexedAttribute<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Append a value and return its index.
    pub fn push(&mut self, value: T) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    pub fn push_face(&mut self, indices: [usize; 3]) {
        self.faces.push(Triangle::from(indices));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.faces.clear();
    }

    /// First `(face, index)` pair whose index is past the end of `values`.
    pub fn first_out_of_bounds(&self) -> Option<(usize, usize)> {
        let len = self.values.len();
        self.faces.iter().enumerate().find_map(|(face, triangle)| {
            triangle
                .indices
                .iter()
                .find(|&&index| index >= len)
                .map(|&index| (face, index))
        })
    }

    pub fn face_indices_in_bounds(&self) -> bool {
        self.first_out_of_bounds().is_none()
    }

    /// Fails with `IndexOutOfBounds` if any face index is invalid.
    pub fn check_indices(&self, attribute: &'static str) -> MeshResult<()> {
        match self.first_out_of_bounds() {
            Some((face, index)) => Err(MeshError::IndexOutOfBounds {
                attribute,
                face,
                index,
                len: self.values.len(),
            }),
            None => Ok(()),
        }
    }
}

impl<T> Default for IndexedAttribute<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// Component-wise bounds of the points, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |aabb, p| Self {
                min: aabb.min.inf(p),
                max: aabb.max.sup(p),
            },
        ))
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Largest side length across the three axes
    pub fn max_extent(&self) -> f32 {
        self.size().max()
    }
}

pub const POSITIONS: &str = "positions";
pub const NORMALS: &str = "normals";
pub const TEXCOORDS: &str = "texcoords";

/// A triangle mesh with independently indexed positions, normals and
/// texture coordinates.
///
/// `positions.faces` is the authoritative triangulation. Tangents and
/// bitangents are always per position, so `tangents.faces` mirrors it and
/// `bitangents` runs parallel to `tangents.values`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: IndexedAttribute<Point3<f32>>,
    pub normals: IndexedAttribute<Vector3<f32>>,
    pub texcoords: IndexedAttribute<Point2<f32>>,
    pub tangents: IndexedAttribute<Vector3<f32>>,
    pub bitangents: Vec<Vector3<f32>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every attribute and face list to empty.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.texcoords.clear();
        self.tangents.clear();
        self.bitangents.clear();
    }

    pub fn face_count(&self) -> usize {
        self.positions.face_count()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.positions.faces.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions.values)
    }

    /// Fails if the normal or texture coordinate faces are present but not
    /// in one-to-one correspondence with the position faces.
    pub fn check_face_counts(&self) -> MeshResult<()> {
        let expected = self.positions.face_count();
        for (attribute, faces) in [
            (NORMALS, self.normals.face_count()),
            (TEXCOORDS, self.texcoords.face_count()),
        ] {
            if faces != 0 && faces != expected {
                return Err(MeshError::FaceCountMismatch {
                    attribute,
                    faces,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Names of the attributes whose faces reference missing elements.
    pub fn invalid_index_attributes(&self) -> Vec<&'static str> {
        let checks = [
            (POSITIONS, self.positions.face_indices_in_bounds()),
            (NORMALS, self.normals.face_indices_in_bounds()),
            (TEXCOORDS, self.texcoords.face_indices_in_bounds()),
        ];
        checks
            .into_iter()
            .filter_map(|(attribute, valid)| (!valid).then_some(attribute))
            .collect()
    }

    /// Closed axis-aligned cube centered at the origin, wound counter-clockwise
    /// when seen from outside.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.positions.push(Point3::new(x, y, z));
        }

        for face in [
            // Front
            [4, 5, 6],
            [4, 6, 7],
            // Back
            [0, 3, 2],
            [0, 2, 1],
            // Top
            [3, 7, 6],
            [3, 6, 2],
            // Bottom
            [0, 1, 5],
            [0, 5, 4],
            // Right
            [1, 2, 6],
            [1, 6, 5],
            // Left
            [0, 4, 7],
            [0, 7, 3],
        ] {
            mesh.positions.push_face(face);
        }

        mesh
    }
}
