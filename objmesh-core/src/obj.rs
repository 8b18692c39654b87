/// Wavefront OBJ reader and writer for indexed meshes
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use nalgebra::{Point2, Point3, Vector3};
use nom::{
    character::complete::{char, i64 as integer, space0, space1},
    combinator::{all_consuming, opt},
    multi::{count, many0},
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};
use tracing::{debug, info, warn};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Mesh, NORMALS, POSITIONS, TEXCOORDS};

/// First line of every file written by this module
pub const HEADER: &str = "# OBJ written by objmesh";

/// What happened while reading a file, beyond the data itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Four-sided faces split into two triangles
    pub quads_triangulated: usize,
    /// Faces with five or more vertices that were fan-triangulated
    pub polygons_triangulated: usize,
    /// Faces with fewer than three vertices
    pub skipped_faces: usize,
    /// Records with a keyword this reader does not handle
    pub ignored_records: usize,
}

/// One corner of a face record, as written: 1-based, negative counts back
/// from the end, 0 means the component is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexBundle {
    pub position: i64,
    pub texcoord: i64,
    pub normal: i64,
}

impl FromStr for VertexBundle {
    type Err = String;

    /// Parse `v`, `v/vt`, `v/vt/vn` or `v//vn`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match all_consuming(parse_bundle)(token) {
            Ok((_, bundle)) => Ok(bundle),
            Err(_) => Err(format!("invalid face vertex '{token}'")),
        }
    }
}

fn parse_bundle(input: &str) -> IResult<&str, VertexBundle> {
    let (input, position) = integer(input)?;
    let (input, rest) = opt(pair(
        preceded(char('/'), opt(integer)),
        opt(preceded(char('/'), integer)),
    ))(input)?;
    let (texcoord, normal) = rest.unwrap_or((None, None));

    Ok((
        input,
        VertexBundle {
            position,
            texcoord: texcoord.unwrap_or(0),
            normal: normal.unwrap_or(0),
        },
    ))
}

/// Parse exactly `N` leading numbers; further numbers are allowed and ignored.
fn parse_components<const N: usize>(rest: &str, line: usize) -> MeshResult<[f32; N]> {
    let result: IResult<&str, Vec<f32>> = all_consuming(terminated(
        count(preceded(space1, float), N),
        pair(many0(preceded(space1, float)), space0),
    ))(rest);

    let invalid = || MeshError::parse(line, format!("expected {N} numbers"));
    match result {
        Ok((_, values)) => values.try_into().map_err(|_| invalid()),
        Err(_) => Err(invalid()),
    }
}

/// Convert a raw index to 0-based against the attribute's current length.
fn resolve_index(
    raw: i64,
    len: usize,
    line: usize,
    attribute: &'static str,
) -> MeshResult<Option<usize>> {
    let before_start = || MeshError::IndexBeforeStart {
        line,
        attribute,
        index: raw,
    };
    match raw {
        0 => Ok(None),
        k if k > 0 => usize::try_from(k - 1)
            .map(Some)
            .map_err(|_| MeshError::parse(line, format!("{attribute} index {k} is too large"))),
        k => usize::try_from(k.unsigned_abs())
            .ok()
            .and_then(|back| len.checked_sub(back))
            .map(Some)
            .ok_or_else(before_start),
    }
}

/// A face corner resolved to 0-based indices
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

fn resolve_corner(token: &str, line: usize, mesh: &Mesh) -> MeshResult<Corner> {
    let bundle = VertexBundle::from_str(token).map_err(|message| MeshError::parse(line, message))?;
    let position = resolve_index(bundle.position, mesh.positions.len(), line, POSITIONS)?
        .ok_or(MeshError::MissingPositionIndex { line })?;

    Ok(Corner {
        position,
        texcoord: resolve_index(bundle.texcoord, mesh.texcoords.len(), line, TEXCOORDS)?,
        normal: resolve_index(bundle.normal, mesh.normals.len(), line, NORMALS)?,
    })
}

/// Every corner must agree on presence, and so must the faces already read.
fn check_presence(
    corners: &[Corner],
    present: impl Fn(&Corner) -> bool,
    attribute_faces: usize,
    position_faces: usize,
    line: usize,
    attribute: &'static str,
) -> MeshResult<()> {
    let has = present(&corners[0]);
    if corners.iter().any(|corner| present(corner) != has) {
        return Err(MeshError::InconsistentFace { line, attribute });
    }
    let covered_so_far = attribute_faces == position_faces;
    if (has && !covered_so_far) || (!has && attribute_faces > 0) {
        return Err(MeshError::PartialCoverage { line, attribute });
    }
    Ok(())
}

fn read_face(
    rest: &str,
    line: usize,
    mesh: &mut Mesh,
    summary: &mut LoadSummary,
) -> MeshResult<()> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 3 {
        warn!(line, "Skipping a face with less than 3 vertices");
        summary.skipped_faces += 1;
        return Ok(());
    }

    let corners = tokens
        .iter()
        .map(|token| resolve_corner(token, line, mesh))
        .collect::<MeshResult<Vec<_>>>()?;

    let position_faces = mesh.positions.face_count();
    check_presence(
        &corners,
        |c| c.texcoord.is_some(),
        mesh.texcoords.face_count(),
        position_faces,
        line,
        TEXCOORDS,
    )?;
    check_presence(
        &corners,
        |c| c.normal.is_some(),
        mesh.normals.face_count(),
        position_faces,
        line,
        NORMALS,
    )?;

    match corners.len() {
        3 => {}
        4 => summary.quads_triangulated += 1,
        n => {
            warn!(line, "Triangulating a face with {} vertices", n);
            summary.polygons_triangulated += 1;
        }
    }

    for i in 2..corners.len() {
        let (a, b, c) = (corners[0], corners[i - 1], corners[i]);
        mesh.positions.push_face([a.position, b.position, c.position]);
        if let (Some(ta), Some(tb), Some(tc)) = (a.texcoord, b.texcoord, c.texcoord) {
            mesh.texcoords.push_face([ta, tb, tc]);
        }
        if let (Some(na), Some(nb), Some(nc)) = (a.normal, b.normal, c.normal) {
            mesh.normals.push_face([na, nb, nc]);
        }
    }

    Ok(())
}

/// Read OBJ records into `mesh`, replacing whatever it held.
///
/// On error the mesh contents are unspecified and should be discarded.
pub fn read_obj<R: BufRead>(mut reader: R, mesh: &mut Mesh) -> MeshResult<LoadSummary> {
    mesh.clear();
    let mut summary = LoadSummary::default();
    let mut buffer = Vec::new();
    let mut number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        number += 1;
        // Only record payloads must be ASCII; comments and names may hold any bytes.
        let line = String::from_utf8_lossy(&buffer);
        let trimmed = line.trim();
        let Some(keyword) = trimmed.split_whitespace().next() else {
            continue;
        };
        let rest = &trimmed[keyword.len()..];

        match keyword {
            "v" => {
                let [x, y, z] = parse_components::<3>(rest, number)?;
                mesh.positions.push(Point3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_components::<3>(rest, number)?;
                mesh.normals.push(Vector3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_components::<2>(rest, number)?;
                mesh.texcoords.push(Point2::new(u, v));
            }
            "f" => read_face(rest, number, mesh, &mut summary)?,
            comment if comment.starts_with('#') => {}
            _ => summary.ignored_records += 1,
        }
    }

    if summary.quads_triangulated > 0 {
        info!("Triangulated {} quadrilaterals", summary.quads_triangulated);
    }
    debug!(
        positions = mesh.positions.len(),
        normals = mesh.normals.len(),
        texcoords = mesh.texcoords.len(),
        faces = mesh.face_count(),
        "Read OBJ"
    );

    Ok(summary)
}

/// Parse OBJ text held in memory
pub fn parse_obj(input: &str) -> MeshResult<Mesh> {
    let mut mesh = Mesh::new();
    read_obj(input.as_bytes(), &mut mesh)?;
    Ok(mesh)
}

fn open(path: &Path) -> MeshResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })
}

/// Load an OBJ file into a new mesh
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let reader = BufReader::new(open(path.as_ref())?);
    let mut mesh = Mesh::new();
    read_obj(reader, &mut mesh)?;
    Ok(mesh)
}

/// Checks that run before anything is written.
///
/// Mismatched face counts are fatal. Out-of-range indices only warn: the
/// file is still written and will describe an invalid mesh.
fn validate_for_write(mesh: &Mesh) -> MeshResult<()> {
    mesh.check_face_counts()?;
    for attribute in mesh.invalid_index_attributes() {
        warn!("Faces for {} contain invalid indices, OBJ will contain an invalid mesh", attribute);
    }
    Ok(())
}

fn write_records<W: Write>(mesh: &Mesh, writer: &mut W) -> MeshResult<()> {
    // Display for f32 prints the shortest text that parses back to the same value.
    writeln!(writer, "{HEADER}")?;

    writeln!(writer)?;
    for p in &mesh.positions.values {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    writeln!(writer)?;
    for t in &mesh.texcoords.values {
        writeln!(writer, "vt {} {}", t.x, t.y)?;
    }

    writeln!(writer)?;
    for n in &mesh.normals.values {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    writeln!(writer)?;
    let texcoord_faces = &mesh.texcoords.faces;
    let normal_faces = &mesh.normals.faces;
    for (face, triangle) in mesh.positions.faces.iter().enumerate() {
        write!(writer, "f")?;
        for corner in 0..3 {
            let v = triangle.indices[corner] + 1;
            let vt = texcoord_faces.get(face).map(|t| t.indices[corner] + 1);
            let vn = normal_faces.get(face).map(|n| n.indices[corner] + 1);
            match (vt, vn) {
                (None, None) => write!(writer, " {v}")?,
                (Some(vt), None) => write!(writer, " {v}/{vt}")?,
                (None, Some(vn)) => write!(writer, " {v}//{vn}")?,
                (Some(vt), Some(vn)) => write!(writer, " {v}/{vt}/{vn}")?,
            }
        }
        writeln!(writer)?;
    }

    debug!(
        positions = mesh.positions.len(),
        faces = mesh.face_count(),
        "Wrote OBJ"
    );
    Ok(())
}

/// Write the mesh as OBJ text. Nothing is written if validation fails.
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> MeshResult<()> {
    validate_for_write(mesh)?;
    write_records(mesh, &mut writer)
}

/// Save the mesh to an OBJ file. The file is not created if validation fails.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> MeshResult<()> {
    validate_for_write(mesh)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_records(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

impl Mesh {
    /// Replace this mesh with the contents of an OBJ file.
    ///
    /// On error the mesh is left empty.
    pub fn load_obj<P: AsRef<Path>>(&mut self, path: P) -> MeshResult<LoadSummary> {
        self.clear();
        let reader = BufReader::new(open(path.as_ref())?);
        let mut loaded = Mesh::new();
        let summary = read_obj(reader, &mut loaded)?;
        *self = loaded;
        Ok(summary)
    }

    pub fn save_obj<P: AsRef<Path>>(&self, path: P) -> MeshResult<()> {
        save_obj(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;

    fn read(input: &str) -> (Mesh, LoadSummary) {
        let mut mesh = Mesh::new();
        let summary = read_obj(input.as_bytes(), &mut mesh).unwrap();
        (mesh, summary)
    }

    fn written(mesh: &Mesh) -> String {
        let mut out = Vec::new();
        write_obj(mesh, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.positions.push(Point3::new(0.0, 0.0, 0.0));
        mesh.positions.push(Point3::new(1.0, 0.0, 0.0));
        mesh.positions.push(Point3::new(0.0, 1.0, 0.0));
        mesh.positions.push_face([0, 1, 2]);
        mesh
    }

    #[test]
    fn test_vertex_bundle_forms() {
        let bundle = |s: &str| s.parse::<VertexBundle>().unwrap();
        assert_eq!(bundle("7"), VertexBundle { position: 7, texcoord: 0, normal: 0 });
        assert_eq!(bundle("7/3"), VertexBundle { position: 7, texcoord: 3, normal: 0 });
        assert_eq!(bundle("7/3/2"), VertexBundle { position: 7, texcoord: 3, normal: 2 });
        assert_eq!(bundle("7//2"), VertexBundle { position: 7, texcoord: 0, normal: 2 });
        assert_eq!(bundle("-1/-2/-3"), VertexBundle { position: -1, texcoord: -2, normal: -3 });
    }

    #[test]
    fn test_vertex_bundle_rejects_garbage() {
        assert!("a/1".parse::<VertexBundle>().is_err());
        assert!("1/x".parse::<VertexBundle>().is_err());
        assert!("1/2/3/4".parse::<VertexBundle>().is_err());
        assert!("".parse::<VertexBundle>().is_err());
    }

    #[test]
    fn test_records_and_blank_lines() {
        let (mesh, summary) = read(concat!(
            "# a comment\n\nv 1 2 3\nv 4 5 6\n\nv 7 8 9\n",
            "vn 0 0 1\nvt 0.25 0.75\nf 1/1/1 2/1/1 3/1/1\n",
        ));
        assert_eq!(mesh.positions.values[1], Point3::new(4.0, 5.0, 6.0));
        assert_eq!(mesh.normals.values, vec![Vector3::new(0.0, 0.0, 1.0)]);
        assert_eq!(mesh.texcoords.values, vec![Point2::new(0.25, 0.75)]);
        assert_eq!(mesh.positions.faces, vec![Triangle::new(0, 1, 2)]);
        assert_eq!(mesh.texcoords.faces, vec![Triangle::new(0, 0, 0)]);
        assert_eq!(mesh.normals.faces, vec![Triangle::new(0, 0, 0)]);
        assert_eq!(summary, LoadSummary::default());
    }

    #[test]
    fn test_negative_indices_resolve_against_current_length() {
        let (mesh, _) = read("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nv 1 1 1\nf -1 -2 -3\n");
        assert_eq!(mesh.positions.faces, vec![Triangle::new(4, 3, 2)]);
    }

    #[test]
    fn test_negative_index_before_start() {
        let mut mesh = Mesh::new();
        let result = read_obj("v 0 0 0\nv 1 0 0\nf 1 2 -3\n".as_bytes(), &mut mesh);
        assert!(matches!(
            result,
            Err(MeshError::IndexBeforeStart { line: 3, index: -3, .. })
        ));
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let (mesh, summary) = read("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(
            mesh.positions.faces,
            vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
        );
        assert_eq!(summary.quads_triangulated, 1);
        assert_eq!(summary.polygons_triangulated, 0);
    }

    #[test]
    fn test_pentagon_is_fan_triangulated() {
        let (mesh, summary) = read(concat!(
            "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\n",
            "vn 0 0 1\nf 1//1 2//1 3//1 4//1 5//1\n",
        ));
        assert_eq!(
            mesh.positions.faces,
            vec![
                Triangle::new(0, 1, 2),
                Triangle::new(0, 2, 3),
                Triangle::new(0, 3, 4)
            ]
        );
        assert_eq!(mesh.normals.face_count(), 3);
        assert_eq!(summary.polygons_triangulated, 1);
        assert_eq!(summary.quads_triangulated, 0);
    }

    #[test]
    fn test_face_with_two_vertices_is_skipped() {
        let (mesh, summary) = read("v 0 0 0\nv 1 0 0\nf 1 2\n");
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(summary.skipped_faces, 1);
    }

    #[test]
    fn test_unknown_records_are_ignored() {
        let (mesh, summary) =
            read("o thing\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\ns off\nf 1 2 3\n");
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(summary.ignored_records, 3);
    }

    #[test]
    fn test_extra_components_are_ignored() {
        let (mesh, _) = read("v 1 2 3 1\nvt 0.5 0.5 0\n");
        assert_eq!(mesh.positions.values, vec![Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.texcoords.values, vec![Point2::new(0.5, 0.5)]);
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let mut mesh = Mesh::new();
        let result = read_obj("v 0 0 0\nv 1 zero 0\n".as_bytes(), &mut mesh);
        assert!(matches!(result, Err(MeshError::Parse { line: 2, .. })));

        let result = read_obj("vt 0.5\n".as_bytes(), &mut mesh);
        assert!(matches!(result, Err(MeshError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_missing_position_index() {
        let mut mesh = Mesh::new();
        let result = read_obj("v 0 0 0\nf 1 0 1\n".as_bytes(), &mut mesh);
        assert!(matches!(result, Err(MeshError::MissingPositionIndex { line: 2 })));
    }

    #[test]
    fn test_inconsistent_face_is_rejected() {
        let mut mesh = Mesh::new();
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2 3/1\n";
        let result = read_obj(input.as_bytes(), &mut mesh);
        assert!(matches!(
            result,
            Err(MeshError::InconsistentFace { line: 5, attribute: TEXCOORDS })
        ));
    }

    #[test]
    fn test_inconsistent_normals_are_rejected() {
        let mut mesh = Mesh::new();
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3\n";
        let result = read_obj(input.as_bytes(), &mut mesh);
        assert!(matches!(
            result,
            Err(MeshError::InconsistentFace { line: 5, attribute: NORMALS })
        ));
    }

    #[test]
    fn test_non_utf8_comment_is_ignored() {
        let mut mesh = Mesh::new();
        let input: &[u8] = b"# cr\xe9\xe9 par Bl\xe9nder\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let summary = read_obj(input, &mut mesh).unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.positions.faces, vec![Triangle::new(0, 1, 2)]);
        assert_eq!(summary, LoadSummary::default());
    }

    #[test]
    fn test_non_utf8_in_record_is_a_parse_error() {
        let mut mesh = Mesh::new();
        let result = read_obj(&b"v 0 0 0\nv 1 \xe9 0\n"[..], &mut mesh);
        assert!(matches!(result, Err(MeshError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_partial_coverage_is_rejected() {
        let mut mesh = Mesh::new();
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\nf 1//1 2//1 3//1\n";
        let result = read_obj(input.as_bytes(), &mut mesh);
        assert!(matches!(
            result,
            Err(MeshError::PartialCoverage { line: 6, attribute: NORMALS })
        ));
    }

    #[test]
    fn test_load_clears_previous_contents() {
        let mut mesh = Mesh::cube(1.0);
        read_obj("v 0 0 0\n".as_bytes(), &mut mesh).unwrap();
        assert_eq!(mesh.positions.len(), 1);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_write_positions_only() {
        assert_eq!(
            written(&triangle_mesh()),
            "# OBJ written by objmesh\n\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\n\n\nf 1 2 3\n"
        );
    }

    #[test]
    fn test_write_face_shapes() {
        let mut mesh = triangle_mesh();
        mesh.texcoords.push(Point2::new(0.5, 0.5));
        mesh.texcoords.push_face([0, 0, 0]);
        assert!(written(&mesh).ends_with("\nvt 0.5 0.5\n\n\nf 1/1 2/1 3/1\n"));

        mesh.normals.push(Vector3::new(0.0, 0.0, 1.0));
        mesh.normals.push_face([0, 0, 0]);
        assert!(written(&mesh).ends_with("\nvn 0 0 1\n\nf 1/1/1 2/1/1 3/1/1\n"));

        mesh.texcoords.clear();
        assert!(written(&mesh).ends_with("\nf 1//1 2//1 3//1\n"));
    }

    #[test]
    fn test_write_keeps_full_precision() {
        let mut mesh = Mesh::new();
        let x = 0.1_f32 + 0.2_f32;
        mesh.positions.push(Point3::new(x, 1.0 / 3.0, -1.0e-7));
        let reparsed = parse_obj(&written(&mesh)).unwrap();
        assert_eq!(reparsed.positions.values, mesh.positions.values);
    }

    #[test]
    fn test_write_rejects_mismatched_faces_without_output() {
        let mut mesh = triangle_mesh();
        mesh.positions.push_face([2, 1, 0]);
        mesh.normals.push(Vector3::z());
        mesh.normals.push_face([0, 0, 0]);

        let mut out = Vec::new();
        let result = write_obj(&mesh, &mut out);
        assert!(matches!(
            result,
            Err(MeshError::FaceCountMismatch { attribute: NORMALS, faces: 1, expected: 2 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_proceeds_with_out_of_bounds_indices() {
        let mut mesh = triangle_mesh();
        mesh.positions.push_face([0, 1, 9]);
        assert_eq!(mesh.invalid_index_attributes(), vec![POSITIONS]);
        assert!(written(&mesh).ends_with("f 1 2 3\nf 1 2 10\n"));
    }

    #[test]
    fn test_write_proceeds_with_out_of_bounds_attribute_indices() {
        let mut mesh = triangle_mesh();
        mesh.texcoords.push(Point2::new(0.5, 0.5));
        mesh.texcoords.push_face([0, 0, 3]);
        assert_eq!(mesh.invalid_index_attributes(), vec![TEXCOORDS]);
        assert!(written(&mesh).ends_with("f 1/1 2/1 3/4\n"));

        mesh.normals.push(Vector3::z());
        mesh.normals.push_face([1, 0, 0]);
        assert_eq!(mesh.invalid_index_attributes(), vec![NORMALS, TEXCOORDS]);
        assert!(written(&mesh).ends_with("f 1/1/2 2/1/1 3/4/1\n"));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.obj");
        let original = triangle_mesh();
        original.save_obj(&path).unwrap();

        let mut loaded = Mesh::cube(3.0);
        let summary = loaded.load_obj(&path).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(summary, LoadSummary::default());
    }

    #[test]
    fn test_save_does_not_create_file_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.obj");
        let mut mesh = triangle_mesh();
        mesh.texcoords.push(Point2::origin());
        mesh.texcoords.push_face([0, 0, 0]);
        mesh.texcoords.push_face([0, 0, 0]);

        assert!(save_obj(&mesh, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let mut mesh = Mesh::cube(1.0);
        let result = mesh.load_obj("nonexistent_mesh_12345.obj");
        assert!(matches!(result, Err(MeshError::FileNotFound { .. })));
        assert!(mesh.is_empty());
        assert!(load_obj("nonexistent_mesh_12345.obj").is_err());
    }
}
