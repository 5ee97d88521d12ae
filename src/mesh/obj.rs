//! Single-pass Wavefront OBJ loader.
//!
//! Handles the subset the demo needs: `v`, `vn`, `vt`, and triangular `f`
//! records with any of the `p`, `p/t`, `p//n`, `p/t/n` reference forms.
//! Faces without normals get a computed flat face normal. Every face emits
//! three fresh vertices — no deduplication — so flat shading survives.
//! There is no error recovery: the first malformed record aborts the load.

use std::path::Path;

use glam::Vec3;

use crate::error::CubeError;
use crate::mesh::{Mesh, Vertex, DEFAULT_ALBEDO};

/// One `f`-record vertex reference, already resolved to 0-based indices.
#[derive(Debug, Clone, Copy)]
struct FaceRef {
    position: usize,
    normal: Option<usize>,
}

/// Load an OBJ file from disk.
///
/// # Errors
///
/// Returns [`CubeError::Io`] when the file cannot be read and
/// [`CubeError::MeshLoad`] for malformed or empty content.
pub fn load(path: &Path) -> Result<Mesh, CubeError> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}

/// Parse OBJ text into a [`Mesh`].
///
/// # Errors
///
/// Returns [`CubeError::MeshLoad`] with a line number for malformed
/// records, out-of-range indices, non-triangular faces, or input with no
/// faces at all.
pub fn parse(source: &str) -> Result<Mesh, CubeError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut mesh = Mesh::default();

    for (line_index, raw_line) in source.lines().enumerate() {
        let line_no = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(prefix) = fields.next() else {
            continue;
        };

        match prefix {
            "v" => positions.push(parse_vec3(fields, line_no)?),
            "vn" => normals.push(parse_vec3(fields, line_no)?),
            "vt" => {
                // Texture coordinates are validated but unused: the
                // vertex format carries a color instead.
                let _ = parse_floats::<2>(fields, line_no)?;
            }
            "f" => {
                let refs: Vec<&str> = fields.collect();
                if refs.len() != 3 {
                    return Err(CubeError::MeshLoad(format!(
                        "line {line_no}: expected 3 face vertices, got {}",
                        refs.len()
                    )));
                }
                let a = parse_face_ref(refs[0], positions.len(), line_no)?;
                let b = parse_face_ref(refs[1], positions.len(), line_no)?;
                let c = parse_face_ref(refs[2], positions.len(), line_no)?;
                emit_triangle(&mut mesh, &positions, &normals, [a, b, c]);
            }
            // Object/group/material records are irrelevant here.
            _ => {}
        }
    }

    if mesh.vertices.is_empty() {
        return Err(CubeError::MeshLoad(
            "no faces found in OBJ input".into(),
        ));
    }
    Ok(mesh)
}

/// Append one triangle, computing a flat face normal for any vertex
/// reference that lacks a `vn` index.
fn emit_triangle(
    mesh: &mut Mesh,
    positions: &[Vec3],
    normals: &[Vec3],
    refs: [FaceRef; 3],
) {
    let [p0, p1, p2] = refs.map(|r| positions[r.position]);
    let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

    let base = mesh.vertices.len() as u32;
    for face_ref in refs {
        let normal = face_ref
            .normal
            .and_then(|i| normals.get(i).copied())
            .unwrap_or(face_normal);
        mesh.vertices.push(Vertex {
            position: positions[face_ref.position].to_array(),
            normal: normal.to_array(),
            color: DEFAULT_ALBEDO,
        });
    }
    mesh.indices.extend([base, base + 1, base + 2]);
}

fn parse_vec3<'a>(
    fields: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vec3, CubeError> {
    let [x, y, z] = parse_floats::<3>(fields, line_no)?;
    Ok(Vec3::new(x, y, z))
}

fn parse_floats<'a, const N: usize>(
    mut fields: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<[f32; N], CubeError> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        let field = fields.next().ok_or_else(|| {
            CubeError::MeshLoad(format!(
                "line {line_no}: expected {} numeric components",
                N
            ))
        })?;
        *slot = field.parse().map_err(|_| {
            CubeError::MeshLoad(format!(
                "line {line_no}: invalid number {field:?}"
            ))
        })?;
    }
    Ok(out)
}

/// Parse a `p`, `p/t`, `p//n`, or `p/t/n` face vertex reference.
///
/// OBJ indices are 1-based; they are converted to 0-based here and
/// position indices are bounds-checked against the records seen so far.
fn parse_face_ref(
    text: &str,
    position_count: usize,
    line_no: usize,
) -> Result<FaceRef, CubeError> {
    let mut parts = text.split('/');

    let position_field = parts.next().unwrap_or_default();
    let position = parse_index(position_field, line_no)?.ok_or_else(|| {
        CubeError::MeshLoad(format!(
            "line {line_no}: face vertex {text:?} missing position index"
        ))
    })?;
    if position >= position_count {
        return Err(CubeError::MeshLoad(format!(
            "line {line_no}: position index {} out of range (have {})",
            position + 1,
            position_count
        )));
    }

    // Texture index (second field) is parsed for validity and discarded.
    if let Some(tex_field) = parts.next() {
        let _ = parse_index(tex_field, line_no)?;
    }
    let normal = match parts.next() {
        Some(normal_field) => parse_index(normal_field, line_no)?,
        None => None,
    };

    Ok(FaceRef { position, normal })
}

/// Parse one optional 1-based index field into a 0-based index.
fn parse_index(
    field: &str,
    line_no: usize,
) -> Result<Option<usize>, CubeError> {
    if field.is_empty() {
        return Ok(None);
    }
    let value: usize = field.parse().map_err(|_| {
        CubeError::MeshLoad(format!("line {line_no}: invalid index {field:?}"))
    })?;
    if value == 0 {
        return Err(CubeError::MeshLoad(format!(
            "line {line_no}: OBJ indices are 1-based, got 0"
        )));
    }
    Ok(Some(value - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_WITH_NORMALS: &str = "\
# a single triangle
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 -1
f 1//1 2//1 3//1
";

    #[test]
    fn parses_triangle_with_explicit_normals() {
        let mesh = parse(TRIANGLE_WITH_NORMALS).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, -1.0]);
            assert_eq!(vertex.color, DEFAULT_ALBEDO);
        }
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn computes_flat_normal_when_missing() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let mesh = parse(source).unwrap();
        // Counter-clockwise in xy ⇒ +Z face normal.
        for vertex in &mesh.vertices {
            assert!((vertex.normal[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn accepts_position_texture_normal_form() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 0 1
vt 0 0
vt 1 0
vt 0 1
vn 0 -1 0
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse(source).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[0].normal, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn skips_comments_and_unknown_records() {
        let source = "\
# comment
o cube
usemtl pink
v 0 0 0
v 1 0 0
v 0 1 0
s off
f 1 2 3
";
        let mesh = parse(source).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn faces_do_not_share_vertices() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
";
        let mesh = parse(source).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejects_out_of_range_position_index() {
        let source = "\
v 0 0 0
v 1 0 0
f 1 2 3
";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, CubeError::MeshLoad(_)));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_zero_index() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 0 1 2
";
        let err = parse(source).unwrap_err();
        assert!(err.to_string().contains("1-based"));
    }

    #[test]
    fn rejects_non_triangular_faces() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let err = parse(source).unwrap_err();
        assert!(err.to_string().contains("expected 3 face vertices"));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse("# nothing here\n").unwrap_err();
        assert!(err.to_string().contains("no faces"));
    }

    #[test]
    fn rejects_malformed_float() {
        let err = parse("v 0 zero 0\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
