//! Mesh validation and reporting.

use nalgebra::Point3;
use tracing::{debug, warn};

use crate::adjacency::MeshAdjacency;
use crate::Mesh;

/// Validation report for a mesh.
#[derive(Debug, Clone)]
pub struct MeshReport {
    /// Whether the mesh has no boundary edges.
    pub is_watertight: bool,

    /// Whether all edges have at most 2 adjacent faces.
    pub is_manifold: bool,

    /// Number of boundary edges (edges with 1 adjacent face).
    pub boundary_edge_count: usize,

    /// Number of non-manifold edges (edges with >2 adjacent faces).
    pub non_manifold_edge_count: usize,

    /// Number of vertices joining more than one fan of faces.
    pub non_manifold_vertex_count: usize,

    /// Number of faces that repeat a vertex index.
    pub degenerate_face_count: usize,

    /// Vertex buffer length.
    pub vertex_count: usize,

    /// Vertices referenced by at least one face.
    pub referenced_vertex_count: usize,

    /// Total face count.
    pub face_count: usize,

    /// Unique undirected edge count.
    pub edge_count: usize,

    /// V - E + F over referenced vertices.
    pub euler_characteristic: i64,

    /// Bounding box as (min_corner, max_corner).
    pub bounds: Option<(Point3<f64>, Point3<f64>)>,

    /// Dimensions (x, y, z).
    pub dimensions: Option<(f64, f64, f64)>,
}

impl MeshReport {
    /// Check if mesh passes basic validity checks.
    pub fn is_valid(&self) -> bool {
        self.vertex_count > 0 && self.face_count > 0
    }

    /// Check if every subdivision scheme accepts this mesh as-is.
    pub fn is_subdividable(&self) -> bool {
        self.is_valid()
            && self.is_watertight
            && self.is_manifold
            && self.non_manifold_vertex_count == 0
            && self.degenerate_face_count == 0
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(
            f,
            "  Vertices: {} ({} referenced)",
            self.vertex_count, self.referenced_vertex_count
        )?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Euler characteristic: {}", self.euler_characteristic)?;

        if let Some((min, max)) = &self.bounds {
            writeln!(
                f,
                "  Bounds: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            )?;
        }

        if let Some((dx, dy, dz)) = &self.dimensions {
            writeln!(f, "  Dimensions: {:.3} x {:.3} x {:.3}", dx, dy, dz)?;
        }

        writeln!(
            f,
            "  Watertight: {} (boundary edges: {})",
            if self.is_watertight { "yes" } else { "NO" },
            self.boundary_edge_count
        )?;

        writeln!(
            f,
            "  Manifold: {} (non-manifold edges: {}, vertices: {})",
            if self.is_manifold && self.non_manifold_vertex_count == 0 {
                "yes"
            } else {
                "NO"
            },
            self.non_manifold_edge_count,
            self.non_manifold_vertex_count
        )?;

        if self.degenerate_face_count > 0 {
            writeln!(f, "  Degenerate faces: {}", self.degenerate_face_count)?;
        }

        writeln!(
            f,
            "  Subdividable: {}",
            if self.is_subdividable() { "yes" } else { "NO" }
        )?;

        Ok(())
    }
}

/// Validate a mesh and return a report.
///
/// Topology is read from the index buffer as given; run
/// [`Mesh::normalized`] first for meshes that duplicate corners per face.
pub fn validate_mesh(mesh: &Mesh) -> MeshReport {
    let adjacency = MeshAdjacency::build(&mesh.indices);

    let boundary_edge_count = adjacency.boundary_edge_count();
    let non_manifold_edge_count = adjacency.non_manifold_edge_count();

    let bounds = mesh.bounds();
    let dimensions = mesh.dimensions().map(|d| (d.x, d.y, d.z));

    let report = MeshReport {
        is_watertight: boundary_edge_count == 0,
        is_manifold: non_manifold_edge_count == 0,
        boundary_edge_count,
        non_manifold_edge_count,
        non_manifold_vertex_count: adjacency.non_manifold_vertices().len(),
        degenerate_face_count: adjacency.degenerate_faces().count(),
        vertex_count: mesh.vertex_count(),
        referenced_vertex_count: adjacency.referenced_vertex_count(),
        face_count: mesh.face_count(),
        edge_count: adjacency.edges.len(),
        euler_characteristic: adjacency.euler_characteristic(),
        bounds,
        dimensions,
    };

    if !report.is_watertight {
        warn!(
            "Mesh is not watertight: {} boundary edges",
            boundary_edge_count
        );
    }

    if !report.is_manifold {
        warn!(
            "Mesh is not manifold: {} non-manifold edges",
            non_manifold_edge_count
        );
    }

    debug!("{}", report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::normalize::DEFAULT_TOLERANCE;

    #[test]
    fn test_validate_closed_mesh() {
        let report = validate_mesh(&fixtures::cube());

        assert!(report.is_valid());
        assert!(report.is_watertight);
        assert!(report.is_manifold);
        assert!(report.is_subdividable());
        assert_eq!(report.edge_count, 18);
        assert_eq!(report.euler_characteristic, 2);
        assert_eq!(report.dimensions, Some((1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_validate_open_mesh() {
        let report = validate_mesh(&fixtures::book());

        assert!(report.is_valid());
        assert!(!report.is_watertight);
        assert!(report.is_manifold);
        assert!(!report.is_subdividable());
        assert_eq!(report.boundary_edge_count, 4);
    }

    #[test]
    fn test_unwelded_mesh_reports_open_until_normalized() {
        let raw = fixtures::unwelded_tetrahedron();
        assert!(!validate_mesh(&raw).is_watertight);

        let welded = raw.normalized(DEFAULT_TOLERANCE).expect("valid input");
        let report = validate_mesh(&welded);
        assert!(report.is_subdividable());
        assert_eq!(report.referenced_vertex_count, 4);
        assert_eq!(report.vertex_count, 6);
    }

    #[test]
    fn test_report_display() {
        let report = validate_mesh(&fixtures::tetrahedron());
        let output = format!("{}", report);

        assert!(output.contains("Vertices: 4"));
        assert!(output.contains("Faces: 4"));
        assert!(output.contains("Watertight: yes"));
        assert!(output.contains("Subdividable: yes"));
    }
}
