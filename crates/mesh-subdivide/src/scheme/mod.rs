//! Subdivision schemes.
//!
//! Every scheme runs the same preparation: weld the input, build adjacency,
//! and reject anything that is not a closed two-manifold. The stencils then
//! index the two faces of each edge directly.

pub mod butterfly;
pub mod catmull_clark;
pub mod loop_subdivision;
pub mod sqrt3;

use nalgebra::{Point3, Vector3};

use crate::adjacency::MeshAdjacency;
use crate::error::{SubdivideError, SubdivideResult};
use crate::topology::Edge;
use crate::Mesh;

/// A welded, validated snapshot of the input mesh.
pub(crate) struct Prepared {
    /// Normalized positions. Slots no face refers to are stale.
    pub vertices: Vec<Point3<f64>>,
    pub adjacency: MeshAdjacency,
}

impl Prepared {
    pub fn new(mesh: &Mesh, tolerance: f64) -> SubdivideResult<Self> {
        if mesh.vertices.is_empty() {
            return Err(SubdivideError::EmptyMesh);
        }
        if mesh.indices.is_empty() {
            return Err(SubdivideError::NoFaces);
        }

        let normalized = mesh.normalized(tolerance)?;
        let adjacency = MeshAdjacency::build(&normalized.indices);
        adjacency.ensure_closed_manifold()?;

        Ok(Self {
            vertices: normalized.vertices,
            adjacency,
        })
    }

    #[inline]
    pub fn position(&self, v: u32) -> Point3<f64> {
        self.vertices[v as usize]
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.adjacency.triangles.len()
    }

    /// True if some face uses vertex slot `v`.
    #[inline]
    pub fn is_referenced(&self, v: u32) -> bool {
        !self.adjacency.faces_of_vertex(v).is_empty()
    }

    /// The two faces sharing `edge`.
    pub fn pair(&self, edge: &Edge) -> SubdivideResult<(usize, usize)> {
        self.adjacency.edge_pair(edge).ok_or_else(|| {
            SubdivideError::topology(format!(
                "edge {} does not have exactly 2 adjacent faces",
                edge
            ))
        })
    }

    /// The vertex of `face` not on `edge`.
    pub fn opposite(&self, face: usize, edge: &Edge) -> SubdivideResult<u32> {
        self.adjacency.triangles[face].opposite(edge).ok_or_else(|| {
            SubdivideError::topology(format!("edge {} is not on face {}", edge, face))
        })
    }

    /// Index of `edge` in the adjacency edge list.
    pub fn edge_id(&self, edge: &Edge) -> SubdivideResult<usize> {
        self.adjacency
            .edge_id(edge)
            .ok_or_else(|| SubdivideError::topology(format!("edge {} not in mesh", edge)))
    }

    /// Valence of `v` and the sum of its neighbours' positions.
    pub fn neighbor_sum(&self, v: u32) -> (usize, Vector3<f64>) {
        let neighbors = self.adjacency.neighbors(v);
        let sum = neighbors
            .iter()
            .fold(Vector3::zeros(), |acc, &n| acc + self.position(n).coords);
        (neighbors.len(), sum)
    }

    /// Centroid of every face, in face order.
    pub fn face_centers(&self) -> Vec<Point3<f64>> {
        self.adjacency
            .triangles
            .iter()
            .map(|t| t.center(&self.vertices))
            .collect()
    }
}
