/// objmesh core library - indexed triangle meshes and their geometry
///
/// This library provides the mesh data structure, Wavefront OBJ import and
/// export, vertex normal and tangent frame estimation, and affine transforms.

pub mod error;
pub mod geometry;
pub mod normals;
pub mod obj;
pub mod tangents;
pub mod transform;

// Re-export commonly used types
pub use error::{MeshError, MeshResult};
pub use geometry::{Aabb, IndexedAttribute, Mesh, Triangle};
pub use normals::NormalWeighting;
pub use obj::{load_obj, parse_obj, read_obj, save_obj, write_obj, LoadSummary, VertexBundle};
pub use tangents::{TangentFrames, UvDegeneracy};
pub use transform::Transform;
