//! Topological value types: undirected edges and triangles built from them.
//!
//! Identity is purely combinatorial. Two edges are equal when they join the
//! same pair of vertex indices, in either order; two triangles are equal when
//! they span the same set of three vertex indices.

use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Point3;

/// An undirected edge between two vertex indices.
///
/// The stored order records the direction the edge was first walked and is
/// available through [`Edge::s1`] / [`Edge::s2`], but it never participates in
/// equality or hashing.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge {
    pub s1: u32,
    pub s2: u32,
}

impl Edge {
    #[inline]
    pub const fn new(a: u32, b: u32) -> Self {
        Self { s1: a, s2: b }
    }

    /// Canonical `(min, max)` key.
    #[inline]
    pub const fn key(&self) -> (u32, u32) {
        if self.s1 <= self.s2 {
            (self.s1, self.s2)
        } else {
            (self.s2, self.s1)
        }
    }

    #[inline]
    pub const fn contains(&self, v: u32) -> bool {
        self.s1 == v || self.s2 == v
    }

    /// The endpoint opposite `v`, or `None` if `v` is not on this edge.
    #[inline]
    pub const fn other(&self, v: u32) -> Option<u32> {
        if self.s1 == v {
            Some(self.s2)
        } else if self.s2 == v {
            Some(self.s1)
        } else {
            None
        }
    }

    /// Vertex shared with `other`, if the two edges meet.
    ///
    /// Equal edges share both endpoints; the first stored one is returned.
    pub fn shared_vertex(&self, other: &Edge) -> Option<u32> {
        if other.contains(self.s1) {
            Some(self.s1)
        } else if other.contains(self.s2) {
            Some(self.s2)
        } else {
            None
        }
    }

    /// Midpoint of the edge.
    #[inline]
    pub fn midpoint(&self, vertices: &[Point3<f64>]) -> Point3<f64> {
        nalgebra::center(&vertices[self.s1 as usize], &vertices[self.s2 as usize])
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.s1, self.s2)
    }
}

/// A triangle as a cycle of three edges.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    edges: [Edge; 3],
}

impl Triangle {
    /// Triangle `a -> b -> c` with edges `(a,b)`, `(b,c)`, `(c,a)`.
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            edges: [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)],
        }
    }

    /// Triangle from three edges that form a cycle.
    pub const fn from_edges(edges: [Edge; 3]) -> Self {
        Self { edges }
    }

    #[inline]
    pub const fn edges(&self) -> &[Edge; 3] {
        &self.edges
    }

    /// The three vertex indices in walk order.
    ///
    /// The first two come from the first edge as stored; the third is the
    /// endpoint of the remaining edges not already taken.
    pub fn points(&self) -> [u32; 3] {
        let [e1, e2, e3] = self.edges;
        let (s1, s2) = (e1.s1, e1.s2);
        let s3 = [e2.s1, e2.s2, e3.s1, e3.s2]
            .into_iter()
            .find(|&v| v != s1 && v != s2)
            .unwrap_or(s2);
        [s1, s2, s3]
    }

    /// Sorted vertex indices; the identity used for equality and hashing.
    pub fn vertex_set(&self) -> [u32; 3] {
        let mut pts = self.points();
        pts.sort_unstable();
        pts
    }

    #[inline]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|e| e == edge)
    }

    #[inline]
    pub fn contains_vertex(&self, v: u32) -> bool {
        self.edges.iter().any(|e| e.contains(v))
    }

    /// The vertex of this triangle that is not on `edge`.
    ///
    /// Returns `None` if `edge` is not one of this triangle's edges.
    pub fn opposite(&self, edge: &Edge) -> Option<u32> {
        if !self.contains_edge(edge) {
            return None;
        }
        self.points().into_iter().find(|&v| !edge.contains(v))
    }

    /// `edge` oriented the way this triangle walks it.
    pub fn directed(&self, edge: &Edge) -> Option<Edge> {
        let [a, b, c] = self.points();
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
            .into_iter()
            .find(|e| e == edge)
    }

    /// True if the two triangles share at least one edge.
    pub fn is_adjacent(&self, other: &Triangle) -> bool {
        self != other && self.edges.iter().any(|e| other.contains_edge(e))
    }

    /// True if any vertex index repeats.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertex_set();
        a == b || b == c
    }

    /// Centroid of the three vertex positions.
    pub fn center(&self, vertices: &[Point3<f64>]) -> Point3<f64> {
        let [a, b, c] = self.points();
        let sum = vertices[a as usize].coords
            + vertices[b as usize].coords
            + vertices[c as usize].coords;
        Point3::from(sum / 3.0)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_set() == other.vertex_set()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertex_set().hash(state);
    }
}
