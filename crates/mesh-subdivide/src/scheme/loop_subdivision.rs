//! Loop subdivision.
//!
//! Edge points use the `3/8, 3/8, 1/8, 1/8` stencil over the edge's endpoints
//! and the two opposite vertices; original vertices are relaxed towards their
//! one-ring with Loop's valence-dependent weight. Each face is split in four.
//!
//! Edge points are emitted per face and not shared with the neighbouring
//! face, so the output holds two coincident copies of every edge point.
//! Welding the output (as the next pass does) joins them again.

use std::f64::consts::PI;

use nalgebra::Point3;
use tracing::debug;

use super::Prepared;
use crate::error::SubdivideResult;
use crate::topology::Edge;
use crate::Mesh;

/// Loop's vertex weight for a vertex of the given valence.
///
/// `3/16` for valence 3, `(1/n)(5/8 - (3/8 + 1/4 cos(2pi/n))^2)` above. The
/// general formula is not used at valence 3; smaller valences cannot occur
/// on a closed manifold and also get `3/16`.
pub fn loop_alpha(valence: usize) -> f64 {
    if valence <= 3 {
        return 3.0 / 16.0;
    }
    let n = valence as f64;
    let inner = 3.0 / 8.0 + 0.25 * (2.0 * PI / n).cos();
    (5.0 / 8.0 - inner * inner) / n
}

/// Subdivide once. Input is welded with `tolerance` first.
///
/// # Errors
///
/// Fails if the mesh is empty or not a closed two-manifold after welding.
pub fn subdivide(mesh: &Mesh, tolerance: f64) -> SubdivideResult<Mesh> {
    let prepared = Prepared::new(mesh, tolerance)?;
    let adjacency = &prepared.adjacency;
    let face_count = prepared.face_count();

    let mut edge_points = Vec::with_capacity(adjacency.edges.len());
    for edge in &adjacency.edges {
        let (f0, f1) = prepared.pair(edge)?;
        let left = prepared.opposite(f0, edge)?;
        let right = prepared.opposite(f1, edge)?;
        let ends = prepared.position(edge.s1).coords + prepared.position(edge.s2).coords;
        let wings = prepared.position(left).coords + prepared.position(right).coords;
        edge_points.push(Point3::from(ends * (3.0 / 8.0) + wings * (1.0 / 8.0)));
    }

    let mut out = Mesh::with_capacity(prepared.vertices.len() + 3 * face_count, 4 * face_count);

    for (i, &position) in prepared.vertices.iter().enumerate() {
        let v = i as u32;
        if !prepared.is_referenced(v) {
            out.push_vertex(position);
            continue;
        }
        let (n, sum) = prepared.neighbor_sum(v);
        let alpha = loop_alpha(n);
        out.push_vertex(Point3::from(
            position.coords * (1.0 - n as f64 * alpha) + sum * alpha,
        ));
    }

    for face in &adjacency.triangles {
        let [v1, v2, v3] = face.points();

        let e1 = out.push_vertex(edge_points[prepared.edge_id(&Edge::new(v2, v3))?]);
        let e2 = out.push_vertex(edge_points[prepared.edge_id(&Edge::new(v1, v3))?]);
        let e3 = out.push_vertex(edge_points[prepared.edge_id(&Edge::new(v1, v2))?]);

        out.push_face(v1, e3, e2);
        out.push_face(v2, e1, e3);
        out.push_face(v3, e2, e1);
        out.push_face(e1, e2, e3);
    }

    debug!(
        "Loop: {} faces -> {} vertices, {} faces",
        face_count,
        out.vertex_count(),
        out.face_count()
    );

    Ok(out)
}
