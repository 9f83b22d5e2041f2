//! Catmull-Clark rules adapted to triangle meshes.
//!
//! Each face gets a face point at its centroid and each edge an edge point
//! averaging its endpoints with the two neighbouring face points. Walking a
//! face's edge cycle, every consecutive edge pair emits a triangle between
//! the face point and the two edge points, and a triangle between the two
//! edge points and a freshly emitted copy of the shared corner, moved by the
//! Catmull-Clark vertex rule. One face becomes six.
//!
//! Output layout: `F` face points, then `E` edge points, then `3F` corner
//! copies in walk order.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use super::Prepared;
use crate::error::{SubdivideError, SubdivideResult};
use crate::topology::Edge;
use crate::Mesh;

/// Subdivide once. Input is welded with `tolerance` first.
///
/// # Errors
///
/// Fails if the mesh is empty or not a closed two-manifold after welding.
pub fn subdivide(mesh: &Mesh, tolerance: f64) -> SubdivideResult<Mesh> {
    let prepared = Prepared::new(mesh, tolerance)?;
    let adjacency = &prepared.adjacency;
    let face_count = prepared.face_count();
    let edge_count = adjacency.edges.len();

    let mut out = Mesh::with_capacity(4 * face_count + edge_count, 6 * face_count);

    let centers = prepared.face_centers();
    for center in &centers {
        out.push_vertex(*center);
    }

    for edge in &adjacency.edges {
        let (f0, f1) = prepared.pair(edge)?;
        out.push_vertex(edge_point(
            prepared.position(edge.s1),
            prepared.position(edge.s2),
            centers[f0],
            centers[f1],
        ));
    }
    let edge_point_index = |edge: &Edge| -> SubdivideResult<u32> {
        Ok((face_count + prepared.edge_id(edge)?) as u32)
    };

    let mut corner_cache: HashMap<u32, Point3<f64>> = HashMap::new();

    for (face_idx, face) in adjacency.triangles.iter().enumerate() {
        let [e0, e1, e2] = *face.edges();
        let center_index = face_idx as u32;

        for (prev, edge) in [(e1, e2), (e0, e1), (e2, e0)] {
            let prev_ep = edge_point_index(&prev)?;
            let ep = edge_point_index(&edge)?;
            out.push_face(center_index, prev_ep, ep);

            let corner = edge.shared_vertex(&prev).ok_or_else(|| {
                SubdivideError::topology(format!(
                    "edges {} and {} of face {} do not meet",
                    prev, edge, face_idx
                ))
            })?;
            let moved = *corner_cache
                .entry(corner)
                .or_insert_with(|| vertex_point(&prepared, corner, &centers));
            let moved_index = out.push_vertex(moved);
            out.push_face(moved_index, ep, prev_ep);
        }
    }

    debug!(
        "Catmull-Clark: {} faces, {} edges -> {} vertices, {} faces",
        face_count,
        edge_count,
        out.vertex_count(),
        out.face_count()
    );

    Ok(out)
}

/// `(p1 + p2 + c0 + c1) / 4` for edge endpoints `p1, p2` and the centroids
/// `c0, c1` of the two faces on the edge.
pub fn edge_point(
    p1: Point3<f64>,
    p2: Point3<f64>,
    c0: Point3<f64>,
    c1: Point3<f64>,
) -> Point3<f64> {
    Point3::from((p1.coords + p2.coords + c0.coords + c1.coords) / 4.0)
}

/// Catmull-Clark vertex rule: `(f + 2r + (n - 3) v) / n`.
///
/// `n` is the number of faces around `v`, `f` the mean of their centroids and
/// `r` the mean midpoint of the edges around `v`.
fn vertex_point(prepared: &Prepared, v: u32, centers: &[Point3<f64>]) -> Point3<f64> {
    let adjacency = &prepared.adjacency;
    let faces = adjacency.faces_of_vertex(v);
    let edges = adjacency.edges_of_vertex(v);
    let n = faces.len() as f64;

    let f = faces
        .iter()
        .fold(Vector3::zeros(), |acc, &fi| acc + centers[fi].coords)
        / n;
    let r = edges.iter().fold(Vector3::zeros(), |acc, &ei| {
        acc + adjacency.edges[ei].midpoint(&prepared.vertices).coords
    }) / edges.len() as f64;

    let v = prepared.position(v).coords;
    Point3::from((f + 2.0 * r + (n - 3.0) * v) / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::MeshAdjacency;
    use crate::fixtures;
    use crate::normalize::DEFAULT_TOLERANCE;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_tetrahedron() {
        // F = 4, E = 6: 4 + 6 + 12 vertices, 24 faces.
        let out = subdivide(&fixtures::tetrahedron(), DEFAULT_TOLERANCE).expect("closed mesh");
        assert_eq!(out.vertex_count(), 22);
        assert_eq!(out.face_count(), 24);
        assert!(out.indices_in_bounds());
    }

    #[test]
    fn test_growth_cube() {
        // F = 12, E = 18.
        let out = subdivide(&fixtures::cube(), DEFAULT_TOLERANCE).expect("closed mesh");
        assert_eq!(out.vertex_count(), 12 + 18 + 36);
        assert_eq!(out.face_count(), 72);
    }

    #[test]
    fn test_face_points_come_first() {
        let mesh = fixtures::octahedron();
        let out = subdivide(&mesh, DEFAULT_TOLERANCE).expect("closed mesh");
        let adj = MeshAdjacency::build(&mesh.indices);
        for (i, tri) in adj.triangles.iter().enumerate() {
            assert_relative_eq!(out.vertices[i], tri.center(&mesh.vertices), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_edge_point_formula() {
        let mesh = fixtures::octahedron();
        let out = subdivide(&mesh, DEFAULT_TOLERANCE).expect("closed mesh");
        let adj = MeshAdjacency::build(&mesh.indices);

        let edge = adj.edges[0];
        let (f0, f1) = adj.edge_pair(&edge).expect("closed mesh");
        let expected = edge_point(
            mesh.vertices[edge.s1 as usize],
            mesh.vertices[edge.s2 as usize],
            adj.triangles[f0].center(&mesh.vertices),
            adj.triangles[f1].center(&mesh.vertices),
        );
        assert_relative_eq!(out.vertices[8], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_rule_on_octahedron() {
        // Vertex (1,0,0) of the unit octahedron: n = 4, the face centroids
        // average to (1/3, 0, 0), the edge midpoints to (1/2, 0, 0).
        // (1/3 + 1 + 1) / 4 = 7/12.
        let out = subdivide(&fixtures::octahedron(), DEFAULT_TOLERANCE).expect("closed mesh");
        let expected = Point3::new(7.0 / 12.0, 0.0, 0.0);
        let corner_copies = out.vertices[8 + 12..]
            .iter()
            .filter(|p| (**p - expected).norm() < 1e-12)
            .count();
        assert_eq!(corner_copies, 4, "one copy per incident face");
    }

    #[test]
    fn test_each_face_fans_around_its_center() {
        let out = subdivide(&fixtures::tetrahedron(), DEFAULT_TOLERANCE).expect("closed mesh");
        for (face_idx, tri) in out.faces().enumerate() {
            let original_face = (face_idx / 6) as u32;
            if face_idx % 2 == 0 {
                assert_eq!(tri[0], original_face);
            } else {
                assert!(tri[0] >= 4 + 6, "corner copy after face and edge points");
            }
        }
    }

    #[test]
    fn test_welds_before_subdividing() {
        let welded = subdivide(&fixtures::tetrahedron(), DEFAULT_TOLERANCE).expect("closed mesh");
        let raw = subdivide(&fixtures::unwelded_tetrahedron(), DEFAULT_TOLERANCE)
            .expect("closes after welding");
        assert_eq!(raw.face_count(), welded.face_count());
        assert_eq!(raw.vertex_count(), welded.vertex_count());
    }

    #[test]
    fn test_rejects_open_mesh() {
        let err = subdivide(&fixtures::book(), DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, SubdivideError::InvalidTopology { .. }));
    }
}
