//! Mesh topology queries via adjacency structures.

use hashbrown::{HashMap, HashSet};

use crate::error::{SubdivideError, SubdivideResult};
use crate::topology::{Edge, Triangle};

/// Edge and face incidence for one mesh snapshot.
///
/// Edges are kept in the order they are first met while walking the index
/// buffer, so anything iterating over them produces deterministic output.
/// Face and edge references are positions in [`MeshAdjacency::triangles`]
/// and [`MeshAdjacency::edges`].
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    /// One triangle per index triple, in buffer order.
    pub triangles: Vec<Triangle>,

    /// Unique undirected edges in first-seen order.
    pub edges: Vec<Edge>,

    /// Faces sharing each edge, parallel to `edges`.
    pub edge_to_faces: Vec<Vec<usize>>,

    /// Maps vertex index → faces that use this vertex.
    pub vertex_to_faces: HashMap<u32, Vec<usize>>,

    /// Maps vertex index → edges with this vertex as an endpoint.
    pub vertex_to_edges: HashMap<u32, Vec<usize>>,

    edge_ids: HashMap<Edge, usize>,
}

/// Split an index buffer into triangles. A trailing partial triple is ignored.
pub fn build_triangles(indices: &[u32]) -> Vec<Triangle> {
    indices
        .chunks_exact(3)
        .map(|c| Triangle::new(c[0], c[1], c[2]))
        .collect()
}

/// Unique undirected edges of an index buffer, in first-seen order.
pub fn build_edges(indices: &[u32]) -> Vec<Edge> {
    let mut seen = HashSet::new();
    build_triangles(indices)
        .iter()
        .flat_map(|t| *t.edges())
        .filter(|e| seen.insert(*e))
        .collect()
}

impl MeshAdjacency {
    /// Build adjacency structures from a flat triangle index buffer.
    pub fn build(indices: &[u32]) -> Self {
        let triangles = build_triangles(indices);

        let mut edges = Vec::new();
        let mut edge_ids: HashMap<Edge, usize> = HashMap::new();
        let mut edge_to_faces: Vec<Vec<usize>> = Vec::new();
        let mut vertex_to_faces: HashMap<u32, Vec<usize>> = HashMap::new();
        let mut vertex_to_edges: HashMap<u32, Vec<usize>> = HashMap::new();

        for (face_idx, tri) in triangles.iter().enumerate() {
            for v in tri.points() {
                let faces = vertex_to_faces.entry(v).or_default();
                // Degenerate faces repeat a vertex; record the face once.
                if faces.last() != Some(&face_idx) {
                    faces.push(face_idx);
                }
            }

            for edge in tri.edges() {
                let edge_id = *edge_ids.entry(*edge).or_insert_with(|| {
                    edges.push(*edge);
                    edge_to_faces.push(Vec::new());
                    let id = edges.len() - 1;
                    vertex_to_edges.entry(edge.s1).or_default().push(id);
                    if edge.s2 != edge.s1 {
                        vertex_to_edges.entry(edge.s2).or_default().push(id);
                    }
                    id
                });
                let faces = &mut edge_to_faces[edge_id];
                if faces.last() != Some(&face_idx) {
                    faces.push(face_idx);
                }
            }
        }

        Self {
            triangles,
            edges,
            edge_to_faces,
            vertex_to_faces,
            vertex_to_edges,
            edge_ids,
        }
    }

    /// Position of `edge` in [`MeshAdjacency::edges`].
    #[inline]
    pub fn edge_id(&self, edge: &Edge) -> Option<usize> {
        self.edge_ids.get(edge).copied()
    }

    /// Faces containing `edge`. Empty if the edge is not in the mesh.
    pub fn faces_of_edge(&self, edge: &Edge) -> &[usize] {
        match self.edge_id(edge) {
            Some(id) => &self.edge_to_faces[id],
            None => &[],
        }
    }

    /// Faces containing vertex `v`.
    pub fn faces_of_vertex(&self, v: u32) -> &[usize] {
        match self.vertex_to_faces.get(&v) {
            Some(faces) => faces,
            None => &[],
        }
    }

    /// Edges with `v` as an endpoint.
    pub fn edges_of_vertex(&self, v: u32) -> &[usize] {
        match self.vertex_to_edges.get(&v) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// The two faces on either side of `edge`.
    ///
    /// `None` unless exactly two faces share the edge.
    pub fn edge_pair(&self, edge: &Edge) -> Option<(usize, usize)> {
        match self.faces_of_edge(edge) {
            &[f0, f1] => Some((f0, f1)),
            _ => None,
        }
    }

    /// Distinct vertices joined to `v` by an edge, in edge order.
    pub fn neighbors(&self, v: u32) -> Vec<u32> {
        self.edges_of_vertex(v)
            .iter()
            .filter_map(|&id| self.edges[id].other(v))
            .filter(|&n| n != v)
            .collect()
    }

    /// Number of distinct edge-connected neighbours of `v`.
    #[inline]
    pub fn valence(&self, v: u32) -> usize {
        self.neighbors(v).len()
    }

    /// Number of distinct vertices referenced by at least one face.
    #[inline]
    pub fn referenced_vertex_count(&self) -> usize {
        self.vertex_to_faces.len()
    }

    /// V - E + F over referenced vertices. 2 for a closed genus-0 surface.
    pub fn euler_characteristic(&self) -> i64 {
        self.referenced_vertex_count() as i64 - self.edges.len() as i64
            + self.triangles.len() as i64
    }

    /// Find boundary edges (edges with exactly 1 adjacent face).
    ///
    /// In a watertight mesh, this returns an empty iterator.
    pub fn boundary_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .zip(&self.edge_to_faces)
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(edge, _)| *edge)
    }

    /// Find non-manifold edges (edges with more than 2 adjacent faces).
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .zip(&self.edge_to_faces)
            .filter(|(_, faces)| faces.len() > 2)
            .map(|(edge, _)| *edge)
    }

    /// Faces that repeat a vertex index.
    pub fn degenerate_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_degenerate())
            .map(|(i, _)| i)
    }

    /// Vertices whose incident faces do not form a single edge-connected fan.
    ///
    /// Only meaningful once every edge is known to be manifold. Sorted by
    /// vertex index.
    pub fn non_manifold_vertices(&self) -> Vec<u32> {
        let mut result: Vec<u32> = self
            .vertex_to_faces
            .iter()
            .filter(|(&v, faces)| !self.is_single_fan(v, faces))
            .map(|(&v, _)| v)
            .collect();
        result.sort_unstable();
        result
    }

    fn is_single_fan(&self, v: u32, faces: &[usize]) -> bool {
        let Some(&start) = faces.first() else {
            return true;
        };
        let mut visited: HashSet<usize> = HashSet::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(face) = stack.pop() {
            for edge in self.triangles[face].edges().iter().filter(|e| e.contains(v)) {
                for &next in self.faces_of_edge(edge) {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        visited.len() == faces.len()
    }

    /// Count boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges().count()
    }

    /// Count non-manifold edges.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edges().count()
    }

    /// Check if the mesh is manifold (at most 2 faces for every edge).
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.iter().all(|faces| faces.len() <= 2)
    }

    /// Check if the mesh is watertight (no boundary edges).
    pub fn is_watertight(&self) -> bool {
        self.edge_to_faces.iter().all(|faces| faces.len() >= 2)
    }

    /// Require a closed, manifold, purely triangular mesh.
    ///
    /// Every subdivision stencil indexes the two faces of an edge and the
    /// single opposite vertex of each, so anything else is rejected here with
    /// the first offending element named.
    ///
    /// # Errors
    ///
    /// [`SubdivideError::InvalidTopology`] on an empty face list, a face that
    /// repeats a vertex, an edge without exactly two faces, or a vertex whose
    /// faces form more than one fan.
    pub fn ensure_closed_manifold(&self) -> SubdivideResult<()> {
        if self.triangles.is_empty() {
            return Err(SubdivideError::NoFaces);
        }

        if let Some(face) = self.degenerate_faces().next() {
            return Err(SubdivideError::topology(format!(
                "face {} {:?} repeats a vertex",
                face,
                self.triangles[face].points()
            )));
        }

        for (edge, faces) in self.edges.iter().zip(&self.edge_to_faces) {
            match faces.len() {
                2 => {}
                1 => {
                    return Err(SubdivideError::topology(format!(
                        "edge {} has 1 adjacent face (open boundary)",
                        edge
                    )))
                }
                n => {
                    return Err(SubdivideError::topology(format!(
                        "edge {} has {} adjacent faces (non-manifold)",
                        edge, n
                    )))
                }
            }
        }

        if let Some(&v) = self.non_manifold_vertices().first() {
            return Err(SubdivideError::topology(format!(
                "vertex {} joins more than one fan of faces (non-manifold)",
                v
            )));
        }

        Ok(())
    }
}
