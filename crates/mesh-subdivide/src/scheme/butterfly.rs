//! Butterfly subdivision (Dyn, Levin and Gregory 8-point stencil).
//!
//! Interpolating: original vertices stay where they are and each edge gets
//! one new vertex, shared by both faces on the edge:
//!
//! ```text
//!          e1 ---- c ---- e2
//!            \    / \    /
//!             \  /   \  /
//!              a ----- b
//!             /  \   /  \
//!            /    \ /    \
//!          e3 ---- d ---- e4
//! ```
//!
//! `p = 1/2 (a + b) + 2w (c + d) - w (e1 + e2 + e3 + e4)`, with `w = 1/16`.
//! Each face is then split in four.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use super::Prepared;
use crate::error::{SubdivideError, SubdivideResult};
use crate::topology::Edge;
use crate::Mesh;

/// Tension parameter of the 8-point stencil.
pub const BUTTERFLY_W: f64 = 1.0 / 16.0;

/// Subdivide once. Input is welded with `tolerance` first.
///
/// Output holds the welded vertex buffer unchanged, followed by one edge
/// point per unique edge in adjacency order.
///
/// # Errors
///
/// Fails if the mesh is empty or not a closed two-manifold after welding.
pub fn subdivide(mesh: &Mesh, tolerance: f64) -> SubdivideResult<Mesh> {
    let prepared = Prepared::new(mesh, tolerance)?;
    let adjacency = &prepared.adjacency;
    let face_count = prepared.face_count();
    let base = prepared.vertices.len() as u32;

    let mut out = Mesh::with_capacity(
        prepared.vertices.len() + adjacency.edges.len(),
        4 * face_count,
    );
    out.vertices.extend_from_slice(&prepared.vertices);

    for edge in &adjacency.edges {
        out.push_vertex(edge_point(&prepared, edge)?);
    }

    let midpoint = |a: u32, b: u32| -> SubdivideResult<u32> {
        Ok(base + prepared.edge_id(&Edge::new(a, b))? as u32)
    };

    for face in &adjacency.triangles {
        let [v0, v1, v2] = face.points();
        let m01 = midpoint(v0, v1)?;
        let m12 = midpoint(v1, v2)?;
        let m20 = midpoint(v2, v0)?;

        out.push_face(v0, m01, m20);
        out.push_face(v1, m12, m01);
        out.push_face(v2, m20, m12);
        out.push_face(m01, m12, m20);
    }

    debug!(
        "Butterfly: {} faces -> {} vertices, {} faces",
        face_count,
        out.vertex_count(),
        out.face_count()
    );

    Ok(out)
}

fn edge_point(prepared: &Prepared, edge: &Edge) -> SubdivideResult<Point3<f64>> {
    let (a, b) = (edge.s1, edge.s2);
    let (f0, f1) = prepared.pair(edge)?;
    let c = prepared.opposite(f0, edge)?;
    let d = prepared.opposite(f1, edge)?;

    let wings = [
        wing(prepared, f0, Edge::new(a, c))?,
        wing(prepared, f0, Edge::new(b, c))?,
        wing(prepared, f1, Edge::new(a, d))?,
        wing(prepared, f1, Edge::new(b, d))?,
    ];

    let p = |v: u32| prepared.position(v).coords;
    let wing_sum = wings.iter().fold(Vector3::zeros(), |acc, &v| acc + p(v));

    Ok(Point3::from(
        (p(a) + p(b)) * 0.5 + (p(c) + p(d)) * (2.0 * BUTTERFLY_W) - wing_sum * BUTTERFLY_W,
    ))
}

/// Vertex across `edge` from the face on the far side of `face`.
fn wing(prepared: &Prepared, face: usize, edge: Edge) -> SubdivideResult<u32> {
    let (f0, f1) = prepared.pair(&edge)?;
    let across = match (f0 == face, f1 == face) {
        (true, false) => f1,
        (false, true) => f0,
        _ => {
            return Err(SubdivideError::topology(format!(
                "edge {} has no face across from face {}",
                edge, face
            )))
        }
    };
    prepared.opposite(across, &edge)
}
