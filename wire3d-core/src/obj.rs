/// Line-based mesh file loader
///
/// Understands the vertex/face subset of the Wavefront OBJ format:
///
/// ```text
/// v <x> <y> <z>      vertex, numbered from 1 in file order
/// f <a> <b> <c>      triangle from three 1-based vertex numbers
/// ```
///
/// Face operands may carry `/texture/normal` suffixes, which are ignored.
/// Every other line (comments, `vn`, `vt`, `o`, `g`, ...) is ignored.
///
/// A `v` or `f` line that does not have exactly three numeric operands is
/// skipped and reported in [`MeshLoad::skipped`]; parsing carries on with the
/// next line. A face naming a vertex that does not exist (index `<= 0` or past
/// the vertices read so far) is dropped without a warning.
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use nom::{
    bytes::complete::take_while,
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{all_consuming, map, opt, recognize, verify},
    number::complete::float,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use crate::errors::MeshError;
use crate::geometry::{Mesh, Triangle};
use crate::vector::{vec3, Vec3};

/// Why a `v` or `f` line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDefect {
    #[error("expected 3 operands, found {found}")]
    OperandCount { found: usize },

    #[error("operand is not a number")]
    NotNumeric,
}

/// A rejected line, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub defect: LineDefect,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.defect)
    }
}

/// Result of parsing a mesh file.
#[derive(Debug, Clone, Default)]
pub struct MeshLoad {
    pub mesh: Mesh,
    pub vertex_count: usize,
    pub skipped: Vec<SkippedLine>,
    pub out_of_range_faces: usize,
}

/// Parse mesh source text. Never fails; see the module docs for how bad
/// lines are treated.
pub fn parse_obj(source: &str) -> MeshLoad {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut load = MeshLoad::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim_start();
        let (keyword, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        match keyword {
            "v" => match vertex_operands(rest) {
                Ok((_, (x, y, z))) => vertices.push(vec3(x, y, z)),
                Err(_) => load.skip(line, classify(rest)),
            },
            "f" => match face_operands(rest) {
                Ok((_, (a, b, c))) => {
                    match (lookup(&vertices, a), lookup(&vertices, b), lookup(&vertices, c)) {
                        (Some(p0), Some(p1), Some(p2)) => {
                            load.mesh.add_triangle(Triangle::new(p0, p1, p2))
                        }
                        _ => {
                            debug!("line {line}: face ({a}, {b}, {c}) out of range, dropped");
                            load.out_of_range_faces += 1;
                        }
                    }
                }
                Err(_) => load.skip(line, classify(rest)),
            },
            _ => {}
        }
    }

    load.vertex_count = vertices.len();
    debug!(
        "parsed mesh: {} vertices, {} triangles, {} skipped lines, {} out-of-range faces",
        load.vertex_count,
        load.mesh.len(),
        load.skipped.len(),
        load.out_of_range_faces
    );
    load
}

/// Read and parse a mesh file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshLoad, MeshError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_obj(&source))
}

impl Mesh {
    /// Load the triangles of a mesh file, discarding the parse report.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
        load_obj(path).map(|load| load.mesh)
    }
}

impl MeshLoad {
    fn skip(&mut self, line: usize, defect: LineDefect) {
        let skipped = SkippedLine { line, defect };
        warn!("skipping malformed mesh {skipped}");
        self.skipped.push(skipped);
    }
}

fn lookup(vertices: &[Vec3], index: i64) -> Option<Vec3> {
    let slot = usize::try_from(index).ok()?.checked_sub(1)?;
    vertices.get(slot).copied()
}

fn classify(operands: &str) -> LineDefect {
    match operands.split_whitespace().count() {
        3 => LineDefect::NotNumeric,
        found => LineDefect::OperandCount { found },
    }
}

fn vertex_operands(input: &str) -> IResult<&str, (f32, f32, f32)> {
    all_consuming(terminated(
        tuple((
            preceded(space0, coordinate),
            preceded(space1, coordinate),
            preceded(space1, coordinate),
        )),
        space0,
    ))(input)
}

fn face_operands(input: &str) -> IResult<&str, (i64, i64, i64)> {
    all_consuming(terminated(
        tuple((
            preceded(space0, face_index),
            preceded(space1, face_index),
            preceded(space1, face_index),
        )),
        space0,
    ))(input)
}

/// A finite float. `nan` and `inf` are rejected.
fn coordinate(input: &str) -> IResult<&str, f32> {
    verify(float, |v: &f32| v.is_finite())(input)
}

/// Signed integer, saturated to the `i64` range so huge indices still count
/// as out of range rather than malformed.
fn index(input: &str) -> IResult<&str, i64> {
    map(recognize(pair(opt(one_of("+-")), digit1)), |digits: &str| {
        digits.parse().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    })(input)
}

/// `a`, `a/b`, `a//c` or `a/b/c`; only `a` is kept.
fn face_index(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        opt(preceded(
            char('/'),
            take_while(|c: char| c.is_ascii_digit() || c == '/' || c == '-'),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_and_faces() {
        let load = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 3 4\n");
        assert_eq!(load.vertex_count, 4);
        assert_eq!(load.mesh.len(), 2);
        assert!(load.skipped.is_empty());
        assert_eq!(
            load.mesh.triangles[1].p,
            [vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0)]
        );
    }

    #[test]
    fn test_ignores_other_prefixes() {
        let source = "# a comment\no cube\nvn 0 0 1\nvt 0.5 0.5\ns off\n\nv 1 2 3\n";
        let load = parse_obj(source);
        assert_eq!(load.vertex_count, 1);
        assert!(load.skipped.is_empty());
        assert!(load.mesh.is_empty());
    }

    #[test]
    fn test_whitespace_and_exponents() {
        let load = parse_obj("  v\t-1.5e1   2.25 \t 3  \r\nv 0 0 0\nv 1 1 1\nf 1 2 3");
        assert_eq!(load.vertex_count, 3);
        assert_eq!(load.mesh.triangles[0].p[0], vec3(-15.0, 2.25, 3.0));
    }

    #[test]
    fn test_face_suffixes() {
        let load = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 3/3\n");
        assert_eq!(load.mesh.len(), 1);
        assert!(load.skipped.is_empty());
    }

    #[test]
    fn test_wrong_operand_count_is_skipped() {
        let load = parse_obj("v 0 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1 1\nf 1 2\nf 1 2 3 4\nf 1 2 3\n");
        assert_eq!(load.vertex_count, 3);
        assert_eq!(load.mesh.len(), 1);
        assert_eq!(
            load.skipped,
            vec![
                SkippedLine { line: 1, defect: LineDefect::OperandCount { found: 2 } },
                SkippedLine { line: 5, defect: LineDefect::OperandCount { found: 4 } },
                SkippedLine { line: 6, defect: LineDefect::OperandCount { found: 2 } },
                SkippedLine { line: 7, defect: LineDefect::OperandCount { found: 4 } },
            ]
        );
    }

    #[test]
    fn test_non_numeric_is_skipped() {
        let load = parse_obj("v 0 zero 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 two 3\nf 1.5 2 3\nf 1 2 3\n");
        assert_eq!(load.vertex_count, 3);
        assert_eq!(load.mesh.len(), 1);
        let lines: Vec<usize> = load.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 5, 6]);
        assert!(load.skipped.iter().all(|s| s.defect == LineDefect::NotNumeric));
    }

    #[test]
    fn test_non_finite_coordinates_are_skipped() {
        let load = parse_obj("v nan 0 0\nv inf 1 1\nv 0 -infinity 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(load.vertex_count, 3);
        assert_eq!(load.mesh.len(), 1);
        assert_eq!(load.mesh.triangles[0].p[0], vec3(0.0, 0.0, 0.0));
        let lines: Vec<usize> = load.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert!(load.skipped.iter().all(|s| s.defect == LineDefect::NotNumeric));
    }

    #[test]
    fn test_huge_face_index_is_out_of_range() {
        let load = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99999999999999999999\nf -99999999999999999999 2 3\n");
        assert!(load.mesh.is_empty());
        assert_eq!(load.out_of_range_faces, 2);
        assert!(load.skipped.is_empty());
    }

    #[test]
    fn test_out_of_range_faces_are_dropped_quietly() {
        let load = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\nf 1 2 4\nf -1 2 3\nf 1 2 3\n");
        assert_eq!(load.mesh.len(), 1);
        assert_eq!(load.out_of_range_faces, 3);
        assert!(load.skipped.is_empty());
    }

    #[test]
    fn test_face_only_sees_earlier_vertices() {
        let load = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n");
        assert!(load.mesh.is_empty());
        assert_eq!(load.out_of_range_faces, 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_obj("/definitely/not/here/model.obj");
        assert!(matches!(result, Err(MeshError::Io { .. })));
    }
}
