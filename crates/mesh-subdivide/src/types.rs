//! Core mesh buffers.

use nalgebra::{Point3, Vector3};

/// An indexed triangle mesh as a pair of flat buffers.
///
/// `indices` holds consecutive vertex-index triples, one per face, with
/// counter-clockwise winding. Positions are unit-agnostic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions. Index in this buffer is vertex identity.
    pub vertices: Vec<Point3<f64>>,

    /// Flat triangle index buffer; length is a multiple of 3.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(face_count * 3),
        }
    }

    /// Wrap existing position and index buffers.
    pub fn from_buffers(vertices: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a mesh from positions and per-face index triples.
    pub fn from_faces(vertices: Vec<Point3<f64>>, faces: &[[u32; 3]]) -> Self {
        let indices = faces.iter().flat_map(|f| f.iter().copied()).collect();
        Self { vertices, indices }
    }

    /// Number of vertices in the mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (triangles) in the mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Append a vertex and return its index.
    #[inline]
    pub fn push_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Append a triangle.
    #[inline]
    pub fn push_face(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Iterate over faces as index triples. A trailing partial triple is ignored.
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Check that the index buffer is a whole number of in-range triples.
    pub fn indices_in_bounds(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }

    /// Compute the axis-aligned bounding box.
    /// Returns (min_corner, max_corner) or None if mesh is empty.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &self.vertices[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some((min, max))
    }

    /// Bounding box extents (x, y, z).
    pub fn dimensions(&self) -> Option<Vector3<f64>> {
        self.bounds().map(|(min, max)| max - min)
    }

    /// Sum of face areas.
    pub fn surface_area(&self) -> f64 {
        self.faces()
            .map(|[a, b, c]| {
                let p0 = self.vertices[a as usize];
                let e1 = self.vertices[b as usize] - p0;
                let e2 = self.vertices[c as usize] - p0;
                e1.cross(&e2).norm() * 0.5
            })
            .sum()
    }
}
