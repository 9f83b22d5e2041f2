//! Closed test meshes shared by the unit tests.

use nalgebra::Point3;

use crate::Mesh;

pub(crate) fn tetrahedron() -> Mesh {
    Mesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ],
        &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
    )
}

pub(crate) fn octahedron() -> Mesh {
    Mesh::from_faces(
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ],
        &[
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

pub(crate) fn icosahedron() -> Mesh {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    Mesh::from_faces(
        vec![
            Point3::new(-1.0, t, 0.0),
            Point3::new(1.0, t, 0.0),
            Point3::new(-1.0, -t, 0.0),
            Point3::new(1.0, -t, 0.0),
            Point3::new(0.0, -1.0, t),
            Point3::new(0.0, 1.0, t),
            Point3::new(0.0, -1.0, -t),
            Point3::new(0.0, 1.0, -t),
            Point3::new(t, 0.0, -1.0),
            Point3::new(t, 0.0, 1.0),
            Point3::new(-t, 0.0, -1.0),
            Point3::new(-t, 0.0, 1.0),
        ],
        &[
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ],
    )
}

/// Axis-aligned unit cube, two triangles per side.
pub(crate) fn cube() -> Mesh {
    Mesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ],
        &[
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [1, 2, 6],
            [1, 6, 5],
            [2, 3, 7],
            [2, 7, 6],
            [3, 0, 4],
            [3, 4, 7],
        ],
    )
}

/// Two triangles hinged on edge (0, 1). Open: four boundary edges.
pub(crate) fn book() -> Mesh {
    Mesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ],
        &[[0, 1, 2], [1, 0, 3]],
    )
}

/// A lone triangle: three boundary edges.
pub(crate) fn triangle() -> Mesh {
    Mesh::from_faces(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        &[[0, 1, 2]],
    )
}

/// Same topology as [`tetrahedron`], but every face owns its own corners.
pub(crate) fn unwelded_tetrahedron() -> Mesh {
    let welded = tetrahedron();
    let mut mesh = Mesh::new();
    for [a, b, c] in welded.faces() {
        let ia = mesh.push_vertex(welded.vertices[a as usize]);
        let ib = mesh.push_vertex(welded.vertices[b as usize]);
        let ic = mesh.push_vertex(welded.vertices[c as usize]);
        mesh.push_face(ia, ib, ic);
    }
    mesh
}
