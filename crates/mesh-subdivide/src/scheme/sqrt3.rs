//! Kobbelt's sqrt(3) subdivision.
//!
//! A vertex is inserted at every face centroid and joined to the face's
//! corners; then every original edge is flipped so that it joins the two
//! inserted centroids instead of its old endpoints. Original vertices are
//! relaxed towards their one-ring. Faces triple per pass, and two passes
//! amount to a 1-to-9 refinement of each original face.

use std::f64::consts::PI;

use nalgebra::Point3;
use tracing::debug;

use super::Prepared;
use crate::error::{SubdivideError, SubdivideResult};
use crate::topology::Edge;
use crate::Mesh;

/// Relaxation weight `(4 - 2 cos(2pi/n)) / 9` for a vertex of valence `n`.
pub fn sqrt3_alpha(valence: usize) -> f64 {
    (4.0 - 2.0 * (2.0 * PI / valence as f64).cos()) / 9.0
}

/// Subdivide once. Input is welded with `tolerance` first.
///
/// Output holds the relaxed original vertex buffer followed by one centroid
/// per face, so vertex `V + f` is the center of input face `f`.
///
/// # Errors
///
/// Fails if the mesh is empty or not a closed two-manifold after welding.
pub fn subdivide(mesh: &Mesh, tolerance: f64) -> SubdivideResult<Mesh> {
    let prepared = Prepared::new(mesh, tolerance)?;
    let adjacency = &prepared.adjacency;
    let face_count = prepared.face_count();
    let base = prepared.vertices.len() as u32;

    let mut out = Mesh::with_capacity(prepared.vertices.len() + face_count, 3 * face_count);

    for (i, &position) in prepared.vertices.iter().enumerate() {
        let v = i as u32;
        if !prepared.is_referenced(v) {
            out.push_vertex(position);
            continue;
        }
        let (n, sum) = prepared.neighbor_sum(v);
        let alpha = sqrt3_alpha(n);
        out.push_vertex(Point3::from(
            position.coords * (1.0 - alpha) + sum * (alpha / n as f64),
        ));
    }

    // Centroids come from the unrelaxed positions.
    for center in prepared.face_centers() {
        out.push_vertex(center);
    }

    // Fan triangle `3f + k` spans edge `k` of face `f` and its centroid.
    let mut fan: Vec<[u32; 3]> = Vec::with_capacity(3 * face_count);
    for (face_idx, face) in adjacency.triangles.iter().enumerate() {
        let center = base + face_idx as u32;
        for edge in face.edges() {
            fan.push([edge.s1, edge.s2, center]);
        }
    }

    for edge in &adjacency.edges {
        let (fa, fb) = prepared.pair(edge)?;
        let directed = adjacency.triangles[fa].directed(edge).ok_or_else(|| {
            SubdivideError::topology(format!("edge {} is not on face {}", edge, fa))
        })?;
        let (s, t) = (directed.s1, directed.s2);
        let (ca, cb) = (base + fa as u32, base + fb as u32);

        fan[fan_slot(&prepared, fa, edge)?] = [s, cb, ca];
        fan[fan_slot(&prepared, fb, edge)?] = [t, ca, cb];
    }

    for [a, b, c] in fan {
        out.push_face(a, b, c);
    }

    debug!(
        "sqrt(3): {} faces -> {} vertices, {} faces",
        face_count,
        out.vertex_count(),
        out.face_count()
    );

    Ok(out)
}

fn fan_slot(prepared: &Prepared, face: usize, edge: &Edge) -> SubdivideResult<usize> {
    prepared.adjacency.triangles[face]
        .edges()
        .iter()
        .position(|e| e == edge)
        .map(|k| 3 * face + k)
        .ok_or_else(|| SubdivideError::topology(format!("edge {} is not on face {}", edge, face)))
}
